use std::process::ExitCode;

use clap::Parser;

mod commands;
mod logging;
mod progress;
mod render;

use collapse_core::api::{self as core_api, CliError};
use commands::cli;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();

    let cfg = match load_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            report(&e);
            return ExitCode::from(2);
        }
    };
    let _log_guard = logging::init(&cfg.logging);

    match dispatch(args, cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let CliError::Orchestration(inner) = &e {
                tracing::error!(stage = inner.stage(), error.message = %inner, "run failed");
            }
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &cli::Args) -> Result<core_api::AppConfig, CliError> {
    let cfg = match &args.config {
        Some(path) => core_api::load_config(path)?,
        None => core_api::load_default_config()?,
    };
    Ok(cfg)
}

async fn dispatch(args: cli::Args, cfg: core_api::AppConfig) -> Result<(), CliError> {
    match args.command.clone() {
        cli::Commands::Simulate(sim) => commands::simulate::simulate_cmd(&args, sim, cfg).await,
        cli::Commands::Azure(az) => commands::azure::azure_cmd(&args, az, cfg).await,
    }
}

/// Prints the error with its cause chain.
fn report(err: &CliError) {
    eprintln!("error: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
