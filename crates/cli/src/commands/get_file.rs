//! get-file command - Fetch a single object to an exact destination path
//!
//! No listing probe: the blob path is resolved directly, and parent
//! directories of the destination are created as needed.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use bg_azure::AzureBlobGetter;
use bg_core::Getter as _;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Fetch a single object to an exact destination path
#[derive(Args, Debug)]
pub struct GetFileArgs {
    /// Blob address (https://<account>.blob.<domain>/<container>/<path>)
    pub address: String,

    /// Local destination file path
    pub dest: PathBuf,
}

#[derive(Debug, Serialize)]
struct GetFileOutput {
    address: String,
    dest: String,
    bytes: u64,
}

/// Execute the get-file command
pub async fn execute(args: GetFileArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match AzureBlobGetter::new().get_file(&args.dest, &args.address).await {
        Ok(bytes) => {
            if formatter.is_json() {
                formatter.json(&GetFileOutput {
                    address: args.address,
                    dest: args.dest.display().to_string(),
                    bytes,
                });
            } else {
                formatter.success(&format!(
                    "Fetched {} into {}",
                    humansize::format_size(bytes, humansize::BINARY),
                    formatter.style_name(&args.dest.display().to_string()),
                ));
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Fetch failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
