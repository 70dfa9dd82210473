//! mode command - Classify an address as a file or a directory
//!
//! Probes the store's prefix listing; prints `file` or `dir`.

use clap::Args;

use bg_azure::AzureBlobGetter;
use bg_core::Getter as _;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Classify an address as a single object or an object tree
#[derive(Args, Debug)]
pub struct ModeArgs {
    /// Blob address (https://<account>.blob.<domain>/<container>/<path>)
    pub address: String,
}

/// Execute the mode command
pub async fn execute(args: ModeArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    match AzureBlobGetter::new().classify_mode(&args.address).await {
        Ok(mode) => {
            if formatter.is_json() {
                formatter.json(&serde_json::json!({
                    "address": args.address,
                    "mode": mode,
                }));
            } else {
                formatter.println(&mode.to_string());
            }
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&format!("Classification failed: {e}"));
            ExitCode::from_error(&e)
        }
    }
}
