//! CLI Adapter.

mod create_repo;
mod setup;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app::api::{ConfirmMode, RunRequest};
use crate::app::config::PathOverrides;
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "scm-setup")]
#[command(version)]
#[command(
    about = "Provision an SCM repository and commit workflow configuration to it",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ensure the repository, commit workflow files and run vendor post-setup
    #[clap(visible_alias = "s")]
    Setup(setup::SetupArgs),
    /// Ensure the vendor container and repository exist
    #[clap(visible_alias = "cr")]
    CreateRepo(RunArgs),
}

/// Arguments shared by every command that consumes runner metadata.
#[derive(Args, Debug, Clone)]
pub(crate) struct RunArgs {
    /// Metadata file (JSON or YAML) with the run inputs
    #[arg(short, long, default_value = "metadata.json")]
    metadata: PathBuf,
    /// Tool configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the template component path from the metadata
    #[arg(long)]
    component_path: Option<PathBuf>,
    /// Override the target path from the metadata
    #[arg(long)]
    target_path: Option<PathBuf>,
    /// Directory receiving the run output file
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

impl RunArgs {
    pub(crate) fn into_request(self, confirm: ConfirmMode) -> RunRequest {
        RunRequest {
            metadata: self.metadata,
            config: self.config,
            overrides: PathOverrides {
                component_path: self.component_path,
                target_path: self.target_path,
            },
            output_dir: self.output_dir,
            confirm,
        }
    }
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Setup(args) => setup::run_setup(args),
        Commands::CreateRepo(args) => create_repo::run_create_repo(args),
    };

    if let Err(e) = result {
        tracing::error!(kind = ?e.kind(), "{}", e.user_message());
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// RUST_LOG takes precedence; `--verbose` falls back to DEBUG, otherwise INFO.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
