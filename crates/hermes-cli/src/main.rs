//! Hermes - OpenAPI documentation for admin panel resources.
//!
//! ```bash
//! hermes generate
//! hermes --config demos/hermes.toml serve --generate
//! ```

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = commands::load_config(cli.config.as_deref())?;
    hermes_telemetry::init_logging(&commands::log_config(
        &config.logging,
        cli.log_level.as_deref(),
    ))?;

    match cli.command {
        Command::Generate => commands::generate(&config),
        Command::Serve { generate } => {
            if generate && !commands::generate(&config)? {
                return Ok(false);
            }
            commands::serve(&config).await?;
            Ok(true)
        }
    }
}
