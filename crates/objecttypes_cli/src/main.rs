//! objecttypes command line tool
//!
//! Run with: objecttypes --dir res/ list

mod cli;
mod commands;

use clap::Parser;
use cli::CliArgs;
use commands::CliError;
use objecttypes_project::{EntityRepository, ProjectConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &CliArgs) {
    let filter = match args.log_level() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let mut repo = EntityRepository::with_config(resolve_config(args)?);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&args.command, &mut repo, &mut out)
}

/// Config file first, then command line overrides
fn resolve_config(args: &CliArgs) -> Result<ProjectConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => ProjectConfig::load_from(path)?,
        None => ProjectConfig::load_or_default(),
    };

    if let Some(directory) = &args.directory {
        config.directory = directory.clone();
    }
    if let Some(file_name) = &args.file_name {
        config.file_name = file_name.clone();
    }

    tracing::debug!("Using {}", config.file_path().display());
    Ok(config)
}
