//! Subcommand implementations.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use hermes_config::{ConfigLoader, HermesConfig, LogFormat, LoggingConfig};
use hermes_docs::ArtifactWriter;
use hermes_generator::{Generator, GeneratorSettings};
use hermes_registry::{Manifest, TemplateRouter};
use hermes_server::{DocsServer, ServerSettings};
use hermes_telemetry::LogConfig;

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hermes.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "HERMES";

/// Load configuration: defaults, then the file, then `.env` and environment.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> Result<HermesConfig> {
    let loader = ConfigLoader::new().with_defaults();
    let loader = match path {
        Some(path) => loader
            .with_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => loader.with_optional_file(DEFAULT_CONFIG_FILE)?,
    };

    let config = loader
        .with_dotenv()?
        .with_env_prefix(ENV_PREFIX)
        .load()
        .context("invalid configuration")?;

    Ok(config)
}

/// Logging settings from the `[logging]` section.
pub fn log_config(logging: &LoggingConfig, level_override: Option<&str>) -> LogConfig {
    let config = match logging.format {
        LogFormat::Json => LogConfig::production(),
        LogFormat::Pretty => LogConfig::default(),
    };

    config
        .with_enabled(logging.enabled)
        .with_level(level_override.unwrap_or(&logging.level))
}

/// Route resolver for the configured base URL, named routes and templates.
pub fn router(config: &HermesConfig) -> Result<TemplateRouter> {
    let mut router = TemplateRouter::new(&config.app.base_url);
    for (name, path) in &config.registry.routes {
        router = router.with_route(name, path);
    }
    for (route, template) in config.registry.crud_templates()? {
        router = router.with_template(route, template);
    }
    Ok(router)
}

/// Artifact writer for the `[output]` section.
pub fn writer(config: &HermesConfig) -> ArtifactWriter {
    let output = &config.output;
    ArtifactWriter::new(&output.dir)
        .yaml_format(output.yaml)
        .json_format(output.json)
        .yaml_file(&output.yaml_file)
        .json_file(&output.json_file)
        .debug(output.debug)
}

/// Generator for the `[app]` section.
pub fn generator(config: &HermesConfig) -> Generator {
    let app = &config.app;
    Generator::new(
        GeneratorSettings::new(&app.title)
            .description(&app.description)
            .version(&app.version)
            .server_description(&app.server_description)
            .login_route(&app.login_route),
    )
}

/// Run one generation cycle.
///
/// Returns `Ok(false)` when writing failed outside debug mode; the failure
/// itself has already been logged.
pub fn generate(config: &HermesConfig) -> Result<bool> {
    let manifest_path = Path::new(&config.registry.manifest);
    let manifest = Manifest::from_file(manifest_path).with_context(|| {
        format!(
            "failed to load resource manifest {}",
            manifest_path.display()
        )
    })?;
    info!(
        manifest = %manifest_path.display(),
        resources = manifest.len(),
        "Loaded resource manifest"
    );

    let router = router(config)?;
    let writer = writer(config);

    let written = generator(config)
        .run(&manifest, &router, &writer)
        .context("OpenAPI generation failed")?;

    if written {
        for format in writer.formats() {
            info!(path = %writer.path(format).display(), "Artifact ready");
        }
    } else {
        error!(dir = %writer.dir().display(), "OpenAPI artifacts were not written");
    }

    Ok(written)
}

/// Location of the JSON artifact served by `serve`.
pub fn artifact_path(config: &HermesConfig) -> PathBuf {
    Path::new(&config.output.dir).join(&config.output.json_file)
}

/// Server settings for the `[server]` section.
pub fn server_settings(config: &HermesConfig) -> Result<ServerSettings> {
    let addr: SocketAddr = config
        .server
        .http_addr
        .parse()
        .with_context(|| format!("invalid server address {}", config.server.http_addr))?;

    let title = if config.app.title.is_empty() {
        "API"
    } else {
        &config.app.title
    };

    Ok(ServerSettings::new(addr, artifact_path(config))
        .spec_path(&config.server.spec_path)
        .docs_path(&config.server.docs_path)
        .viewer(config.server.viewer)
        .title(title))
}

/// Serve the documentation until interrupted.
pub async fn serve(config: &HermesConfig) -> Result<()> {
    if !config.output.json {
        warn!(
            path = %artifact_path(config).display(),
            "JSON output is disabled; serving whatever artifact already exists"
        );
    }

    let server = DocsServer::new(server_settings(config)?)?;
    server.run_until(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_docs::{OutputFormat, Viewer};
    use hermes_registry::{CrudRoute, RouteResolver};

    const MANIFEST: &str = r#"
[[resources]]
title = "Posts"
uri_key = "posts"
entity = "App\\Models\\Post"

[[resources.index_fields]]
column = "title"
sortable = true
"#;

    fn config_in(dir: &Path) -> HermesConfig {
        let manifest = dir.join("resources.toml");
        std::fs::write(&manifest, MANIFEST).unwrap();

        let mut config = HermesConfig::default();
        config.app.title = "Blog".to_string();
        config.registry.manifest = manifest.display().to_string();
        config.output.dir = dir.join("out").display().to_string();
        config
    }

    #[test]
    fn test_log_config_from_section() {
        let mut logging = LoggingConfig::default();
        logging.format = LogFormat::Json;

        let config = log_config(&logging, None);
        assert!(config.json_format);
        assert_eq!(config.level, "info");

        let config = log_config(&logging, Some("trace"));
        assert_eq!(config.level, "trace");
    }

    #[test]
    fn test_router_applies_overrides() {
        let mut config = HermesConfig::default();
        config.app.base_url = "https://admin.example.com/".to_string();
        config
            .registry
            .routes
            .insert("authenticate".to_string(), "/auth/login".to_string());
        config
            .registry
            .templates
            .insert("crud.index".to_string(), "/{resource}".to_string());

        let router = router(&config).unwrap();
        assert_eq!(
            router.named("authenticate").unwrap(),
            "https://admin.example.com/auth/login"
        );
        assert_eq!(router.template(CrudRoute::Index), "/{resource}");
    }

    #[test]
    fn test_writer_from_output_section() {
        let mut config = HermesConfig::default();
        config.output.json_file = "api.json".to_string();
        config.output.yaml = false;

        let writer = writer(&config);
        assert_eq!(writer.formats(), vec![OutputFormat::Json]);
        assert_eq!(
            writer.path(OutputFormat::Json),
            Path::new("resources").join("api.json")
        );
    }

    #[test]
    fn test_generate_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        assert!(generate(&config).unwrap());
        assert!(dir.path().join("out/openapi.yaml").exists());
        assert!(dir.path().join("out/openapi.json").exists());
    }

    #[test]
    fn test_generate_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.registry.manifest = dir.path().join("missing.toml").display().to_string();

        assert!(generate(&config).is_err());
    }

    #[test]
    fn test_generate_reports_failure_outside_debug() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        config.output.dir = blocker.join("out").display().to_string();

        assert!(!generate(&config).unwrap());

        config.output.debug = true;
        assert!(generate(&config).is_err());
    }

    #[test]
    fn test_server_settings() {
        let mut config = HermesConfig::default();
        config.server.viewer = Viewer::Redoc;
        config.server.docs_path = "/".to_string();

        let settings = server_settings(&config).unwrap();
        assert_eq!(settings.addr().port(), 8080);
        assert_eq!(settings.docs_route(), "/");
        assert_eq!(settings.artifact(), Path::new("resources").join("openapi.json"));
        assert!(settings.page().contains("API - API Documentation"));
    }
}
