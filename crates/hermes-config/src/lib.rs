//! Typed configuration for Hermes.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`HermesConfig`] holds every section:
//!
//! - [`AppConfig`] - document title, version, base URL and login route
//! - [`RegistryConfig`] - resource manifest, named routes, CRUD templates
//! - [`OutputConfig`] - artifact directory, file names, formats, debug mode
//! - [`ServerConfig`] - documentation server address, paths and viewer
//! - [`LoggingConfig`] - log level and format
//!
//! # Example
//!
//! ```no_run
//! use hermes_config::ConfigLoader;
//!
//! # fn main() -> Result<(), hermes_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("hermes.toml")?
//!     .with_dotenv()?
//!     .with_env_prefix("HERMES")
//!     .load()?;
//!
//! println!("Writing artifacts to {}", config.output.dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [app]
//! title = "Admin API"
//! base_url = "http://localhost:8000"
//! login_route = "authenticate"
//!
//! [registry]
//! manifest = "resources.toml"
//!
//! [output]
//! dir = "resources"
//! yaml = true
//! json = true
//! debug = false
//!
//! [server]
//! http_addr = "127.0.0.1:8080"
//! spec_path = "/openapi.json"
//! docs_path = "/docs"
//! viewer = "swagger"
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```

mod config;
mod error;
mod loader;
mod schema;

pub use config::HermesConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{
    AppConfig, LogFormat, LoggingConfig, OutputConfig, RegistryConfig, ServerConfig,
};
