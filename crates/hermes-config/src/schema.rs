//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use std::collections::BTreeMap;

use hermes_docs::{Viewer, DEFAULT_JSON_FILE, DEFAULT_YAML_FILE};
use hermes_registry::CrudRoute;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Application section: what the document describes.
///
/// # Example
///
/// ```
/// use hermes_config::AppConfig;
///
/// let config = AppConfig::default();
/// assert_eq!(config.base_url, "http://localhost:8000");
/// assert_eq!(config.login_route, "authenticate");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// API title (`info.title`).
    #[serde(default)]
    pub title: String,

    /// API description (`info.description`).
    #[serde(default)]
    pub description: String,

    /// API version (`info.version`).
    #[serde(default = "default_version")]
    pub version: String,

    /// Home URL of the application. Becomes the server entry and is
    /// stripped from every documented path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Named route of the login endpoint.
    #[serde(default = "default_login_route")]
    pub login_route: String,

    /// Description of the server entry.
    #[serde(default = "default_server_description")]
    pub server_description: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: default_version(),
            base_url: default_base_url(),
            login_route: default_login_route(),
            server_description: default_server_description(),
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_login_route() -> String {
    hermes_registry::AUTHENTICATE_ROUTE.to_string()
}

fn default_server_description() -> String {
    "Production API server".to_string()
}

/// Registry section: where resources and routes come from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Path of the resource manifest (TOML or JSON).
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Extra named routes (name to path), e.g. `login = "/auth/login"`.
    #[serde(default)]
    pub routes: BTreeMap<String, String>,

    /// CRUD route template overrides keyed by route name
    /// (`"crud.index" = "/admin/{resource}"`).
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

impl RegistryConfig {
    /// Template overrides with their route names parsed.
    pub fn crud_templates(&self) -> Result<Vec<(CrudRoute, &str)>, ConfigError> {
        self.templates
            .iter()
            .map(|(name, template)| {
                let route = name.parse::<CrudRoute>().map_err(|_| {
                    ConfigError::invalid_value(
                        format!("registry.templates.{name}"),
                        "unknown CRUD route",
                    )
                })?;
                Ok((route, template.as_str()))
            })
            .collect()
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            routes: BTreeMap::new(),
            templates: BTreeMap::new(),
        }
    }
}

fn default_manifest() -> String {
    "resources.toml".to_string()
}

/// Output section: where and how artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output directory.
    #[serde(default = "default_output_dir")]
    pub dir: String,

    /// YAML artifact file name.
    #[serde(default = "default_yaml_file")]
    pub yaml_file: String,

    /// JSON artifact file name.
    #[serde(default = "default_json_file")]
    pub json_file: String,

    /// Write the YAML artifact.
    #[serde(default = "default_true")]
    pub yaml: bool,

    /// Write the JSON artifact.
    #[serde(default = "default_true")]
    pub json: bool,

    /// Fail loudly on write errors instead of reporting failure.
    #[serde(default)]
    pub debug: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            yaml_file: default_yaml_file(),
            json_file: default_json_file(),
            yaml: true,
            json: true,
            debug: false,
        }
    }
}

fn default_output_dir() -> String {
    "resources".to_string()
}

fn default_yaml_file() -> String {
    DEFAULT_YAML_FILE.to_string()
}

fn default_json_file() -> String {
    DEFAULT_JSON_FILE.to_string()
}

fn default_true() -> bool {
    true
}

/// Server section: serving the JSON artifact and the viewer page.
///
/// # Example
///
/// ```
/// use hermes_config::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.spec_path, "/openapi.json");
/// assert_eq!(config.docs_path, "/docs");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// HTTP server bind address (e.g., "127.0.0.1:8080").
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// Path serving the JSON artifact.
    #[serde(default = "default_spec_path")]
    pub spec_path: String,

    /// Path serving the viewer page.
    #[serde(default = "default_docs_path")]
    pub docs_path: String,

    /// Viewer used for the documentation page.
    #[serde(default)]
    pub viewer: Viewer,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            spec_path: default_spec_path(),
            docs_path: default_docs_path(),
            viewer: Viewer::default(),
        }
    }
}

fn default_http_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_spec_path() -> String {
    "/openapi.json".to_string()
}

fn default_docs_path() -> String {
    "/docs".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
