//! ReDoc page generation.
//!
//! ## Usage
//!
//! ```
//! use hermes_docs::ReDoc;
//!
//! let html = ReDoc::new("Admin API", "/openapi.json").html();
//! assert!(html.contains("Redoc.init"));
//! ```

use crate::viewer::{html_escape, js_string};

/// ReDoc configuration and HTML generation.
#[derive(Debug, Clone)]
pub struct ReDoc {
    /// URL of the JSON document.
    spec_url: String,
    /// Title for the HTML page.
    title: String,
    /// Whether to expand responses by default.
    expand_responses: ExpandResponses,
    /// Whether to hide download button.
    hide_download_button: bool,
    /// ReDoc version to use from CDN.
    redoc_version: String,
}

/// Response expansion configuration.
#[derive(Debug, Clone, Copy, Default)]
pub enum ExpandResponses {
    /// Expand all responses.
    All,
    /// Expand only success responses (2xx).
    #[default]
    Success,
    /// Don't expand any responses.
    None,
}

impl ExpandResponses {
    fn as_js(&self) -> &'static str {
        match self {
            Self::All => "\"all\"",
            Self::Success => "\"200,201\"",
            Self::None => "\"\"",
        }
    }
}

impl ReDoc {
    /// Create a page for the API titled `api_title`, loading `spec_url`.
    #[must_use]
    pub fn new(api_title: &str, spec_url: impl Into<String>) -> Self {
        Self {
            spec_url: spec_url.into(),
            title: format!("{api_title} - API Documentation"),
            expand_responses: ExpandResponses::Success,
            hide_download_button: false,
            redoc_version: "2.1.5".to_string(),
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set response expansion behavior.
    #[must_use]
    pub fn expand_responses(mut self, expand: ExpandResponses) -> Self {
        self.expand_responses = expand;
        self
    }

    /// Hide the download button.
    #[must_use]
    pub fn hide_download_button(mut self, hide: bool) -> Self {
        self.hide_download_button = hide;
        self
    }

    /// Set the ReDoc version to use.
    #[must_use]
    pub fn redoc_version(mut self, version: impl Into<String>) -> Self {
        self.redoc_version = version.into();
        self
    }

    /// URL the page loads the document from.
    #[must_use]
    pub fn spec_url(&self) -> &str {
        &self.spec_url
    }

    /// Generate the HTML for ReDoc.
    #[must_use]
    pub fn html(&self) -> String {
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <div id="redoc-container"></div>
    <script src="https://cdn.redoc.ly/redoc/{version}/bundles/redoc.standalone.js"></script>
    <script>
        Redoc.init({spec_url}, {{
            expandResponses: {expand_responses},
            hideDownloadButton: {hide_download}
        }}, document.getElementById('redoc-container'));
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = self.redoc_version,
            spec_url = js_string(&self.spec_url),
            expand_responses = self.expand_responses.as_js(),
            hide_download = self.hide_download_button,
        )
    }

    /// Generate the HTML as bytes for use in HTTP responses.
    #[must_use]
    pub fn html_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redoc_creation() {
        let redoc = ReDoc::new("Test API", "/openapi.json");
        assert_eq!(redoc.spec_url(), "/openapi.json");
        assert_eq!(redoc.title, "Test API - API Documentation");
    }

    #[test]
    fn test_redoc_html_generation() {
        let html = ReDoc::new("Test API", "/openapi.json").html();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("redoc.standalone.js"));
        assert!(html.contains(r#"Redoc.init("/openapi.json""#));
        assert!(html.contains("Test API - API Documentation"));
    }

    #[test]
    fn test_redoc_customization() {
        let html = ReDoc::new("Test API", "/openapi.json")
            .title("Docs")
            .expand_responses(ExpandResponses::All)
            .hide_download_button(true)
            .redoc_version("2.0.0")
            .html();

        assert!(html.contains("<title>Docs</title>"));
        assert!(html.contains("expandResponses: \"all\""));
        assert!(html.contains("hideDownloadButton: true"));
        assert!(html.contains("/redoc/2.0.0/"));
    }

    #[test]
    fn test_expand_responses_as_js() {
        assert_eq!(ExpandResponses::All.as_js(), "\"all\"");
        assert_eq!(ExpandResponses::Success.as_js(), "\"200,201\"");
        assert_eq!(ExpandResponses::None.as_js(), "\"\"");
    }
}
