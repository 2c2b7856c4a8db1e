//! Main configuration types.
//!
//! This module provides the top-level [`HermesConfig`] struct.

use serde::{Deserialize, Serialize};

use crate::{AppConfig, ConfigError, LogFormat, LoggingConfig, OutputConfig, RegistryConfig, ServerConfig};

/// Complete Hermes configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use hermes_config::HermesConfig;
///
/// let config = HermesConfig::default();
/// assert_eq!(config.server.http_addr, "127.0.0.1:8080");
/// assert_eq!(config.output.dir, "resources");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HermesConfig {
    /// Document settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Resource manifest and routes.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Artifact output.
    #[serde(default)]
    pub output: OutputConfig,

    /// Documentation server.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HermesConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` or `ConfigError::ValidationError` if:
    /// - `app.base_url` is not an http(s) URL
    /// - `app.login_route` or `registry.manifest` is empty
    /// - no output format is enabled, or an enabled format has no file name
    /// - `server.http_addr` is not a socket address
    /// - `server.spec_path` / `server.docs_path` do not start with `/` or are equal
    /// - a `registry.templates` key is not a CRUD route name
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.app.base_url.starts_with("http://") || self.app.base_url.starts_with("https://"))
        {
            return Err(ConfigError::invalid_value(
                "app.base_url",
                format!("must start with http:// or https://: {}", self.app.base_url),
            ));
        }

        if self.app.login_route.trim().is_empty() {
            return Err(ConfigError::invalid_value("app.login_route", "must not be empty"));
        }

        if self.registry.manifest.trim().is_empty() {
            return Err(ConfigError::invalid_value("registry.manifest", "must not be empty"));
        }
        self.registry.crud_templates()?;

        if !self.output.yaml && !self.output.json {
            return Err(ConfigError::validation_error(
                "at least one of output.yaml and output.json must be enabled",
            ));
        }
        if self.output.yaml && self.output.yaml_file.trim().is_empty() {
            return Err(ConfigError::invalid_value("output.yaml_file", "must not be empty"));
        }
        if self.output.json && self.output.json_file.trim().is_empty() {
            return Err(ConfigError::invalid_value("output.json_file", "must not be empty"));
        }

        if self
            .server
            .http_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            return Err(ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        for (field, path) in [
            ("server.spec_path", &self.server.spec_path),
            ("server.docs_path", &self.server.docs_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::invalid_value(field, "must start with '/'"));
            }
        }
        if self.server.spec_path == self.server.docs_path {
            return Err(ConfigError::validation_error(
                "server.spec_path and server.docs_path must differ",
            ));
        }

        Ok(())
    }

    /// Development preset: debug logging in human-readable form, write
    /// failures propagate.
    ///
    /// # Example
    ///
    /// ```
    /// use hermes_config::HermesConfig;
    ///
    /// let config = HermesConfig::development();
    /// assert_eq!(config.logging.level, "debug");
    /// assert!(config.output.debug);
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.output.debug = true;

        config
    }

    /// Production preset: JSON logs, write failures reported as a failed run.
    ///
    /// # Example
    ///
    /// ```
    /// use hermes_config::{HermesConfig, LogFormat};
    ///
    /// let config = HermesConfig::production();
    /// assert_eq!(config.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config.output.debug = false;

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(HermesConfig::default().validate().is_ok());
        assert!(HermesConfig::development().validate().is_ok());
        assert!(HermesConfig::production().validate().is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = HermesConfig::default();
        config.app.base_url = "localhost:8000".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("app.base_url"));
    }

    #[test]
    fn test_no_output_format() {
        let mut config = HermesConfig::default();
        config.output.yaml = false;
        config.output.json = false;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_disabled_format_may_have_empty_file_name() {
        let mut config = HermesConfig::default();
        config.output.json = false;
        config.output.json_file = String::new();
        assert!(config.validate().is_ok());

        config.output.json = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_http_addr() {
        let mut config = HermesConfig::default();
        config.server.http_addr = "not-an-address".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.http_addr"));
    }

    #[test]
    fn test_paths_must_be_absolute_and_distinct() {
        let mut config = HermesConfig::default();
        config.server.docs_path = "docs".to_string();
        assert!(config.validate().is_err());

        config.server.docs_path = "/openapi.json".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_login_route() {
        let mut config = HermesConfig::default();
        config.app.login_route = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = HermesConfig::development();
        let toml = toml::to_string(&config).unwrap();
        let parsed: HermesConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }
}
