// Command-line front end: argument parsing, logging setup, dispatch and
// mapping of failures to exit codes.

use crate::commands;
use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR, DEFAULT_TOKEN_FILE};
use crate::error::SlotifyError;
use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "slotify", version)]
#[command(about = "Export or import Slotify data through the token-protected API", long_about = None)]
pub struct Cli {
    /// Base URL for the API
    #[arg(long, global = true, env = "SLOTIFY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path to the API token file
    #[arg(long, global = true, env = "SLOTIFY_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export data as a ZIP file
    Export(ExportArgs),
    /// Import data from a ZIP file
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Directory to save the exported ZIP into
    #[arg(long, env = "SLOTIFY_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Path to the ZIP file to upload
    pub zip_file: PathBuf,
}

/// Parse arguments, run the requested command and return the exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("[!] Logging disabled: {err:#}");
    }

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[✗] Error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to install log subscriber")
}

/// Run the parsed command, printing status lines on success.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new(cli.base_url, &cli.token_file);
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Command::Export(args) => {
            println!("[→] Initiating export from {}", config.base_url);
            let path = commands::export(&config, &args.output_dir)?;
            println!("[✓] Exported data saved to: {}", path.display());
        }
        Command::Import(args) => {
            println!("[→] Initiating import with file: {}", args.zip_file.display());
            let response = commands::import(&config, &args.zip_file)?;
            println!("[✓] Import successful.");
            if let Some(message) = response.message {
                println!("{message}");
            }
        }
    }
    Ok(())
}

/// Exit code for a failed run; library errors carry their own.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<SlotifyError>()
        .map_or(1, SlotifyError::exit_code)
}
