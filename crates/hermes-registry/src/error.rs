//! Registry error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::routes::CrudRoute;

/// Errors raised while loading resource metadata or resolving routes.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Manifest file not found.
    #[error("resource manifest not found: {path}")]
    ManifestNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read the manifest.
    #[error("failed to read resource manifest: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML manifest: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("failed to parse JSON manifest: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A resource definition is invalid.
    #[error("invalid resource {resource}: {reason}")]
    InvalidResource {
        /// URI key (or position) of the offending resource.
        resource: String,
        /// Explanation.
        reason: String,
    },

    /// Two resources share a URI key.
    #[error("duplicate resource uri_key: {0}")]
    DuplicateUriKey(String),

    /// Two URI keys camel-case to the same alias.
    #[error("resources {first} and {second} share the alias {alias}")]
    DuplicateAlias {
        /// Shared alias.
        alias: String,
        /// URI key declared first.
        first: String,
        /// URI key declared later.
        second: String,
    },

    /// A named route is not registered.
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// A route template needs a parameter that was not supplied.
    #[error("route {route} requires parameter {parameter}")]
    MissingParameter {
        /// Route being resolved.
        route: CrudRoute,
        /// Name of the missing parameter.
        parameter: &'static str,
    },
}

impl RegistryError {
    /// Create an invalid resource error.
    pub fn invalid_resource(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResource {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Create a read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
