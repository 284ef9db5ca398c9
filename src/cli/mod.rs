//! Command-line interface.

mod process;

use clap::{Parser, Subcommand};
use console::style;

pub use process::ProcessArgs;

/// Exit codes, kept distinct so scripts can tell failure classes apart.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR_GENERAL: i32 = 1;
pub const EXIT_ERROR_PROCESSING: i32 = 2;
pub const EXIT_ERROR_UNEXPECTED: i32 = 3;

#[derive(Parser)]
#[command(name = "web2json")]
#[command(about = "Web page to structured JSON converter")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Process URLs and convert to structured JSON
    Process(ProcessArgs),
}

/// Parse arguments and dispatch.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process(args) => process::cmd_process(args).await,
    };

    match result {
        Ok(EXIT_SUCCESS) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {e:#}", style("Unexpected error:").red().bold());
            std::process::exit(EXIT_ERROR_UNEXPECTED);
        }
    }
}
