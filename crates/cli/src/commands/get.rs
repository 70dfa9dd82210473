//! get command - Fetch an address into a destination
//!
//! Classifies the address first (unless a mode is forced), then fetches
//! either the whole object tree or the single object.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use indicatif::ProgressBar;
use serde::Serialize;

use bg_azure::AzureBlobGetter;
use bg_core::{ClientMode, FetchSummary, Getter as _};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Fetch an address into a destination, classifying it first
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Blob address (https://<account>.blob.<domain>/<container>/<path>)
    pub address: String,

    /// Local destination path
    pub dest: PathBuf,

    /// Force the transfer mode instead of probing the store
    #[arg(long, value_enum, default_value_t = ForcedMode::Auto)]
    pub mode: ForcedMode,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ForcedMode {
    /// Probe the listing to decide
    Auto,
    /// Treat the address as a single object
    File,
    /// Treat the address as an object tree
    Dir,
}

#[derive(Debug, Serialize)]
struct GetOutput {
    address: String,
    dest: String,
    mode: ClientMode,
    objects: u64,
    bytes: u64,
}

/// Execute the get command
pub async fn execute(args: GetArgs, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);
    let getter = AzureBlobGetter::new();

    let mode = match args.mode {
        ForcedMode::File => ClientMode::File,
        ForcedMode::Dir => ClientMode::Dir,
        ForcedMode::Auto => match getter.classify_mode(&args.address).await {
            Ok(mode) => mode,
            Err(e) => {
                formatter.error(&format!("Classification failed: {e}"));
                return ExitCode::from_error(&e);
            }
        },
    };
    tracing::debug!(%mode, address = %args.address, "classified address");

    let spinner = transfer_spinner(&formatter, &args.address);
    let result = match mode {
        ClientMode::Dir => getter.get_tree(&args.dest, &args.address).await,
        ClientMode::File => getter
            .get_file(&args.dest, &args.address)
            .await
            .map(|bytes| FetchSummary { objects: 1, bytes }),
    };
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            if formatter.is_json() {
                formatter.json(&GetOutput {
                    address: args.address,
                    dest: args.dest.display().to_string(),
                    mode,
                    objects: summary.objects,
                    bytes: summary.bytes,
                });
            } else {
                formatter.success(&format!(
                    "Fetched {} object(s) ({}) into {}",
                    summary.objects,
                    humansize::format_size(summary.bytes, humansize::BINARY),
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

fn transfer_spinner(formatter: &Formatter, address: &str) -> ProgressBar {
    if formatter.is_json() || formatter.is_quiet() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("fetching {address}"));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}
