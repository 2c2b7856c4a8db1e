//! Loading configuration files from disk.

use std::fs;

use hermes_config::{ConfigError, ConfigLoader, LogFormat};

#[test]
fn test_load_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hermes.toml");
    fs::write(
        &path,
        r#"
[app]
title = "Blog admin"
base_url = "https://blog.example.com"

[output]
dir = "public/openapi"
json = false

[logging]
format = "json"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();

    assert_eq!(config.app.title, "Blog admin");
    assert_eq!(config.app.base_url, "https://blog.example.com");
    assert_eq!(config.output.dir, "public/openapi");
    assert!(config.output.yaml);
    assert!(!config.output.json);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_load_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hermes.json");
    fs::write(&path, r#"{"registry": {"manifest": "admin/resources.json"}}"#).unwrap();

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();
    assert_eq!(config.registry.manifest, "admin/resources.json");
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hermes.ini");
    fs::write(&path, "title = x").unwrap();

    let result = ConfigLoader::new().with_file(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_invalid_template_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hermes.toml");
    fs::write(
        &path,
        r#"
[registry.templates]
"crud.archive" = "/{resource}/archive"
"#,
    )
    .unwrap();

    let result = ConfigLoader::new().with_file(&path).unwrap().load();
    assert!(result.is_err());
}
