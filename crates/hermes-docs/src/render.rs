//! Textual renderings of the document.
//!
//! Two formats are supported: block-style YAML and compact single-line
//! JSON. Both render the same [`OpenApi`] value.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::builder::DocumentBuilder;
use crate::error::DocsResult;
use crate::openapi::OpenApi;

/// Output format of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Block-style YAML.
    Yaml,
    /// Compact JSON.
    Json,
}

impl OutputFormat {
    /// Format name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `spec` in the given format.
///
/// # Errors
///
/// Returns the serializer's error if the document cannot be encoded.
pub fn render(spec: &OpenApi, format: OutputFormat) -> DocsResult<String> {
    match format {
        OutputFormat::Yaml => {
            let rendered = serde_yaml::to_string(spec)?;
            Ok(fix_scope_placeholder(&rendered))
        }
        OutputFormat::Json => Ok(serde_json::to_string(spec)?),
    }
}

impl DocumentBuilder {
    /// Render the accumulated document.
    ///
    /// # Errors
    ///
    /// See [`render`].
    pub fn render(&self, format: OutputFormat) -> DocsResult<String> {
        render(self.document(), format)
    }
}

/// Rewrite an empty-map `jwtAuth` scope list to the empty-list form that
/// downstream tooling expects.
///
/// Only security list entries (`- jwtAuth: {}` on a line of their own) are
/// rewritten. Quoted scalars and the bodies of block scalars are copied
/// unchanged, so user text containing the same characters survives.
pub fn fix_scope_placeholder(rendered: &str) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    static BLOCK_HEADER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER
        .get_or_init(|| Regex::new(r"^([ ]*- )jwtAuth: \{ *\}$").expect("valid regex"));
    let block_header = BLOCK_HEADER
        .get_or_init(|| Regex::new(r"(?:^|: |- )[|>][1-9]?[-+]?$").expect("valid regex"));

    let mut fixed = String::with_capacity(rendered.len());
    let mut block_indent: Option<usize> = None;

    for line in rendered.split_inclusive('\n') {
        let text = line.trim_end_matches('\n');
        let indent = text.len() - text.trim_start_matches(' ').len();

        if let Some(parent) = block_indent {
            if text.trim().is_empty() || indent > parent {
                fixed.push_str(line);
                continue;
            }
            block_indent = None;
        }

        if block_header.is_match(text) {
            block_indent = Some(indent);
        }

        fixed.push_str(&placeholder.replace(text, "${1}jwtAuth: []"));
        fixed.push_str(&line[text.len()..]);
    }

    fixed
}
