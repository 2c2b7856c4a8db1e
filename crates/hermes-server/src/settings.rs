//! Server settings.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use hermes_docs::Viewer;

use crate::error::{ServerError, ServerResult};

/// Settings for [`DocsServer`](crate::DocsServer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    addr: SocketAddr,
    artifact: PathBuf,
    spec_path: String,
    docs_path: String,
    viewer: Viewer,
    title: String,
}

impl ServerSettings {
    /// Serve the JSON artifact at `artifact` on `addr`.
    ///
    /// Defaults: spec at `/openapi.json`, viewer page at `/docs`, Swagger UI.
    #[must_use]
    pub fn new(addr: SocketAddr, artifact: impl Into<PathBuf>) -> Self {
        Self {
            addr,
            artifact: artifact.into(),
            spec_path: "/openapi.json".to_string(),
            docs_path: "/docs".to_string(),
            viewer: Viewer::default(),
            title: "API".to_string(),
        }
    }

    /// Set the path serving the raw JSON document.
    #[must_use]
    pub fn spec_path(mut self, path: impl Into<String>) -> Self {
        self.spec_path = path.into();
        self
    }

    /// Set the path serving the viewer page.
    #[must_use]
    pub fn docs_path(mut self, path: impl Into<String>) -> Self {
        self.docs_path = path.into();
        self
    }

    /// Set the viewer.
    #[must_use]
    pub fn viewer(mut self, viewer: Viewer) -> Self {
        self.viewer = viewer;
        self
    }

    /// Set the API title shown on the viewer page.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Listening address.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// JSON artifact location.
    #[must_use]
    pub fn artifact(&self) -> &Path {
        &self.artifact
    }

    /// Path serving the raw JSON document.
    #[must_use]
    pub fn spec_route(&self) -> &str {
        &self.spec_path
    }

    /// Path serving the viewer page.
    #[must_use]
    pub fn docs_route(&self) -> &str {
        &self.docs_path
    }

    /// Render the viewer page.
    #[must_use]
    pub fn page(&self) -> String {
        self.viewer.page(&self.title, &self.spec_path)
    }

    /// Check that both routes are absolute and distinct.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` describing the first problem found.
    pub fn validate(&self) -> ServerResult<()> {
        for (name, path) in [("spec", &self.spec_path), ("docs", &self.docs_path)] {
            if !path.starts_with('/') {
                return Err(ServerError::config(format!(
                    "{name} path must start with '/': {path}"
                )));
            }
        }
        if self.spec_path == self.docs_path {
            return Err(ServerError::config(format!(
                "spec and docs paths must differ: {}",
                self.spec_path
            )));
        }
        Ok(())
    }
}
