//! Error types for the document builder crate.
//!
//! This module defines errors that can occur while rendering the
//! accumulated document and writing it to disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during document rendering and output.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to render the document as YAML.
    #[error("Failed to render OpenAPI document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failed to render the document as JSON.
    #[error("Failed to render OpenAPI document as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write an artifact.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl DocsError {
    /// Create a write error for `path`.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
