//! Writing rendered documents to disk.
//!
//! [`ArtifactWriter`] renders every requested format in memory before
//! touching the file system, then replaces each destination file atomically
//! (temporary file in the same directory, then rename).

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error};

use crate::builder::DocumentBuilder;
use crate::error::{DocsError, DocsResult};
use crate::render::OutputFormat;

/// Default file name of the YAML artifact.
pub const DEFAULT_YAML_FILE: &str = "openapi.yaml";

/// Default file name of the JSON artifact.
pub const DEFAULT_JSON_FILE: &str = "openapi.json";

/// Output settings for a generation run.
///
/// Only YAML is enabled by default.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
    yaml_file: String,
    json_file: String,
    yaml: bool,
    json: bool,
    debug: bool,
}

impl ArtifactWriter {
    /// Create a writer that places artifacts under `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            yaml_file: DEFAULT_YAML_FILE.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            yaml: true,
            json: false,
            debug: false,
        }
    }

    /// Enable or disable the YAML artifact.
    #[must_use]
    pub fn yaml_format(mut self, enable: bool) -> Self {
        self.yaml = enable;
        self
    }

    /// Enable or disable the JSON artifact.
    #[must_use]
    pub fn json_format(mut self, enable: bool) -> Self {
        self.json = enable;
        self
    }

    /// In debug mode failures are returned instead of reported as `false`.
    #[must_use]
    pub fn debug(mut self, enable: bool) -> Self {
        self.debug = enable;
        self
    }

    /// Set the YAML file name.
    #[must_use]
    pub fn yaml_file(mut self, name: impl Into<String>) -> Self {
        self.yaml_file = name.into();
        self
    }

    /// Set the JSON file name.
    #[must_use]
    pub fn json_file(mut self, name: impl Into<String>) -> Self {
        self.json_file = name.into();
        self
    }

    /// Output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether debug mode is on.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Destination of the artifact in `format`.
    #[must_use]
    pub fn path(&self, format: OutputFormat) -> PathBuf {
        match format {
            OutputFormat::Yaml => self.dir.join(&self.yaml_file),
            OutputFormat::Json => self.dir.join(&self.json_file),
        }
    }

    /// Requested formats, YAML first.
    #[must_use]
    pub fn formats(&self) -> Vec<OutputFormat> {
        let mut formats = Vec::with_capacity(2);
        if self.yaml {
            formats.push(OutputFormat::Yaml);
        }
        if self.json {
            formats.push(OutputFormat::Json);
        }
        formats
    }

    /// Render and write every requested format, returning the written paths.
    ///
    /// # Errors
    ///
    /// Returns the first rendering or write failure. Nothing is written when
    /// rendering fails.
    pub fn write(&self, builder: &DocumentBuilder) -> DocsResult<Vec<PathBuf>> {
        let rendered = self
            .formats()
            .into_iter()
            .map(|format| Ok((format, builder.render(format)?)))
            .collect::<DocsResult<Vec<_>>>()?;

        if !rendered.is_empty() {
            fs::create_dir_all(&self.dir).map_err(|e| DocsError::write(&self.dir, e))?;
        }

        let mut written = Vec::with_capacity(rendered.len());
        for (format, contents) in rendered {
            let path = self.path(format);
            replace_file(&path, contents.as_bytes())?;
            debug!(
                format = %format,
                path = %path.display(),
                bytes = contents.len(),
                "wrote OpenAPI artifact"
            );
            written.push(path);
        }

        Ok(written)
    }

    /// Write all requested formats under the configured failure policy.
    ///
    /// Returns `Ok(true)` when every artifact was written. On failure, debug
    /// mode returns the error; otherwise the error is logged and `Ok(false)`
    /// is returned. The result does not say which format failed.
    ///
    /// # Errors
    ///
    /// Only in debug mode; see [`ArtifactWriter::write`].
    pub fn build(&self, builder: &DocumentBuilder) -> DocsResult<bool> {
        match self.write(builder) {
            Ok(_) => Ok(true),
            Err(e) if self.debug => Err(e),
            Err(e) => {
                error!(error = %e, dir = %self.dir.display(), "failed to write OpenAPI artifacts");
                Ok(false)
            }
        }
    }
}

fn replace_file(path: &Path, contents: &[u8]) -> DocsResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DocsError::write(path, e))?;
    tmp.write_all(contents)
        .map_err(|e| DocsError::write(path, e))?;
    tmp.persist(path)
        .map_err(|e| DocsError::write(path, e.error))?;
    Ok(())
}
