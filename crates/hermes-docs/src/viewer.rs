//! Documentation viewer pages.
//!
//! A viewer page is a static HTML document that loads a UI bundle from a CDN
//! and points it at the URL serving the JSON artifact.

use serde::{Deserialize, Serialize};

use crate::redoc::ReDoc;
use crate::swagger::SwaggerUi;

/// Which UI renders the documentation page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewer {
    /// Swagger UI.
    #[default]
    Swagger,
    /// ReDoc.
    Redoc,
}

impl Viewer {
    /// Render the page for `spec_url` with the viewer's default settings.
    #[must_use]
    pub fn page(&self, api_title: &str, spec_url: &str) -> String {
        match self {
            Self::Swagger => SwaggerUi::new(api_title, spec_url).html(),
            Self::Redoc => ReDoc::new(api_title, spec_url).html(),
        }
    }
}

/// Simple HTML escape for XSS prevention in the title.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Encode `s` as a JavaScript string literal.
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_js_string() {
        assert_eq!(js_string("/openapi.json"), "\"/openapi.json\"");
        assert_eq!(js_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(js_string("</script>"), "\"<\\/script>\"");
    }

    #[test]
    fn test_viewer_pages() {
        let swagger = Viewer::Swagger.page("Admin", "/openapi.json");
        assert!(swagger.contains("swagger-ui"));
        assert!(swagger.contains("\"/openapi.json\""));

        let redoc = Viewer::Redoc.page("Admin", "/openapi.json");
        assert!(redoc.contains("redoc"));
        assert!(redoc.contains("\"/openapi.json\""));
    }

    #[test]
    fn test_viewer_deserialize() {
        let viewer: Viewer = serde_json::from_str("\"redoc\"").unwrap();
        assert_eq!(viewer, Viewer::Redoc);
        assert_eq!(Viewer::default(), Viewer::Swagger);
    }
}
