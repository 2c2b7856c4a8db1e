//! # Hermes Docs
//!
//! In-memory OpenAPI 3.0 documents for Hermes.
//!
//! This crate provides:
//! - **Document model**: serde types for the subset of OpenAPI 3.0 Hermes emits
//! - **Document builder**: keyed upserts for tags, components and operations
//! - **Rendering**: block-style YAML and compact JSON of the same document
//! - **Artifact writer**: atomic replacement of the output files
//! - **Viewer pages**: Swagger UI and ReDoc pages that load the JSON artifact
//!
//! ## Quick Start
//!
//! ```
//! use hermes_docs::{DocumentBuilder, HttpMethod, Info, Operation, OutputFormat};
//!
//! let mut builder = DocumentBuilder::new(Info::new("Admin API"));
//! builder
//!     .add_server("http://localhost:8000", "Production API server")
//!     .add_authentication_path("/authenticate")
//!     .add_tag("users")
//!     .add_path("/users", HttpMethod::Get, Operation::new("usersIndex").tag("users"));
//!
//! let yaml = builder.render(OutputFormat::Yaml).unwrap();
//! assert!(yaml.contains("jwtAuth: []"));
//! ```

mod builder;
mod error;
mod openapi;
mod redoc;
mod render;
mod swagger;
mod viewer;
mod writer;

pub use builder::{
    jwt_requirement, DocumentBuilder, AUTHENTICATION_TAG, JWT_SCHEME, SUCCESS_RESPONSE,
    UNAUTHORIZED_RESPONSE, VALIDATION_RESPONSE,
};
pub use error::{DocsError, DocsResult};
pub use openapi::{
    Components, HttpMethod, Info, MediaType, OpenApi, Operation, Parameter, ParameterIn,
    ParameterStyle, PathItem, RequestBody, Response, ResponseEntry, Schema, SchemaType,
    SecurityRequirement, SecurityScheme, Server, Tag, APPLICATION_JSON, OPENAPI_VERSION,
};
pub use redoc::{ExpandResponses, ReDoc};
pub use render::{fix_scope_placeholder, render, OutputFormat};
pub use swagger::{DocExpansion, SwaggerUi};
pub use viewer::Viewer;
pub use writer::{ArtifactWriter, DEFAULT_JSON_FILE, DEFAULT_YAML_FILE};
