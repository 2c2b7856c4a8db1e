//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Generate OpenAPI documentation for admin panel resources
#[derive(Debug, Parser)]
#[command(name = "hermes", version, about, long_about = None)]
#[command(after_help = AFTER_HELP)]
pub struct Cli {
    /// Configuration file (TOML or JSON) [default: hermes.toml if present]
    #[arg(short, long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the configured log level or filter directive
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the document and write the configured artifacts
    Generate,

    /// Serve the JSON artifact and a documentation viewer
    Serve {
        /// Run a generation before serving
        #[arg(long)]
        generate: bool,
    },
}

const AFTER_HELP: &str = "\
ENVIRONMENT VARIABLES:
  Any setting can be overridden as HERMES__SECTION__KEY, e.g.
    HERMES__APP__BASE_URL=https://admin.example.com
    HERMES__OUTPUT__DEBUG=true
    HERMES__SERVER__VIEWER=redoc
  A .env file in the working directory is loaded first.

EXAMPLES:
  hermes generate                       # uses ./hermes.toml when present
  hermes --config demos/hermes.toml generate
  hermes serve --generate
";
