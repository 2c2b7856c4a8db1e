//! HTTP server for generated Hermes documentation.
//!
//! Two routes are served:
//!
//! - `GET {spec_path}` returns the JSON artifact byte-for-byte
//! - `GET {docs_path}` returns a Swagger UI or ReDoc page loading `spec_path`
//!
//! Everything else is a JSON 404.
//!
//! # Example
//!
//! ```rust,ignore
//! use hermes_server::{DocsServer, ServerSettings};
//!
//! let settings = ServerSettings::new("127.0.0.1:8080".parse()?, "resources/openapi.json")
//!     .title("Admin API");
//! DocsServer::new(settings)?.run().await?;
//! ```

mod error;
mod server;
mod settings;

pub use error::{ErrorResponse, ServerError, ServerResult};
pub use server::DocsServer;
pub use settings::ServerSettings;
