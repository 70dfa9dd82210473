//! bget: fetch objects and object trees from Azure Blob Storage by URL
//!
//! Thin calling surface over the bg-core/bg-azure getter: classification,
//! tree fetch and single-object fetch, with human or JSON output.

mod commands;
mod exit_code;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::exit_code::ExitCode;
use crate::output::OutputConfig;

#[derive(Parser, Debug)]
#[command(
    name = "bget",
    version,
    about = "Fetch objects and object trees from Azure Blob Storage"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify an address as a single object or an object tree
    Mode(commands::mode::ModeArgs),
    /// Fetch an address into a destination, classifying it first
    Get(commands::get::GetArgs),
    /// Fetch a single object to an exact destination path
    GetFile(commands::get_file::GetFileArgs),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_config = OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    let code = match cli.command {
        Commands::Mode(args) => commands::mode::execute(args, output_config).await,
        Commands::Get(args) => commands::get::execute(args, output_config).await,
        Commands::GetFile(args) => commands::get_file::execute(args, output_config).await,
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "bget", &mut std::io::stdout());
            ExitCode::Success
        }
    };

    std::process::exit(code as i32);
}
