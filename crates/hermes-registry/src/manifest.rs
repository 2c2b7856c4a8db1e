//! File-backed resource registry.
//!
//! A manifest lists resources as `[[resources]]` tables (TOML) or a
//! `resources` array (JSON):
//!
//! ```toml
//! [[resources]]
//! title = "Blog posts"
//! uri_key = "blog-posts"
//! entity = "App\\Models\\BlogPost"
//!
//! [[resources.index_fields]]
//! column = "id"
//! kind = "number"
//!
//! [[resources.index_fields]]
//! column = "title"
//! sortable = true
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use heck::ToLowerCamelCase;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::resource::{Resource, ResourceDefinition, ResourceRegistry};

/// Resources declared in a manifest file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Resources in declaration order.
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

impl Manifest {
    /// Load and validate a manifest. Files ending in `.json` are parsed as
    /// JSON, everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RegistryError::ManifestNotFound {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| RegistryError::read_error(path, e))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse and validate a TOML manifest.
    pub fn from_toml_str(content: &str) -> RegistryResult<Self> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Parse and validate a JSON manifest.
    pub fn from_json_str(content: &str) -> RegistryResult<Self> {
        let manifest: Self = serde_json::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check that every resource is addressable and that URI keys and their
    /// camel-case aliases are unique.
    pub fn validate(&self) -> RegistryResult<()> {
        let mut seen = HashSet::new();
        let mut aliases: HashMap<String, &str> = HashMap::new();

        for (index, resource) in self.resources.iter().enumerate() {
            if resource.uri_key.trim().is_empty() {
                return Err(RegistryError::invalid_resource(
                    format!("#{index}"),
                    "uri_key must not be empty",
                ));
            }
            if resource.entity.trim().is_empty() {
                return Err(RegistryError::invalid_resource(
                    &resource.uri_key,
                    "entity must not be empty",
                ));
            }
            if resource.key_name.trim().is_empty() {
                return Err(RegistryError::invalid_resource(
                    &resource.uri_key,
                    "key_name must not be empty",
                ));
            }
            if !seen.insert(resource.uri_key.as_str()) {
                return Err(RegistryError::DuplicateUriKey(resource.uri_key.clone()));
            }

            let alias = resource.uri_key.to_lower_camel_case();
            if let Some(first) = aliases.get(&alias) {
                return Err(RegistryError::DuplicateAlias {
                    alias,
                    first: (*first).to_string(),
                    second: resource.uri_key.clone(),
                });
            }
            aliases.insert(alias, &resource.uri_key);
        }

        Ok(())
    }

    /// Number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the manifest declares no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceRegistry for Manifest {
    fn resources(&self) -> Vec<&dyn Resource> {
        self.resources.resources()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    const BLOG: &str = r#"
[[resources]]
title = "Blog posts"
uri_key = "blog-posts"
entity = "App\\Models\\BlogPost"

[[resources.index_fields]]
column = "id"
kind = "number"

[[resources.index_fields]]
column = "title"
sortable = true

[[resources.form_fields]]
column = "id"
kind = "number"

[[resources.form_fields]]
column = "title"

[[resources.filters]]
name = "tags"
kind = "belongs_to"
group = true

[[resources]]
title = "Users"
uri_key = "users"
entity = "User"
key_name = "uuid"
"#;

    #[test]
    fn test_parse_toml() {
        let manifest = Manifest::from_toml_str(BLOG).unwrap();
        assert_eq!(manifest.len(), 2);

        let posts = &manifest.resources[0];
        assert_eq!(posts.entity, "App\\Models\\BlogPost");
        assert_eq!(posts.key_name, "id");
        assert_eq!(posts.index_fields[0].kind, FieldKind::Number);
        assert!(posts.index_fields[1].sortable);
        assert!(posts.filters[0].group);

        assert_eq!(manifest.resources[1].key_name, "uuid");
    }

    #[test]
    fn test_parse_json() {
        let manifest = Manifest::from_json_str(
            r#"{"resources": [{
                "title": "Posts",
                "uri_key": "posts",
                "entity": "Post",
                "index_fields": [{"column": "title", "default": null}]
            }]}"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 1);
        assert!(manifest.resources[0].index_fields[0].default.is_none());
    }

    #[test]
    fn test_registry_order() {
        let manifest = Manifest::from_toml_str(BLOG).unwrap();
        let keys: Vec<_> = manifest.resources().iter().map(|r| r.uri_key()).collect();
        assert_eq!(keys, vec!["blog-posts", "users"]);
    }

    #[test]
    fn test_duplicate_uri_key() {
        let content = r#"
[[resources]]
title = "A"
uri_key = "posts"
entity = "Post"

[[resources]]
title = "B"
uri_key = "posts"
entity = "Article"
"#;
        let err = Manifest::from_toml_str(content).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateUriKey(key) if key == "posts"));
    }

    #[test]
    fn test_colliding_alias_rejected() {
        let content = r#"
[[resources]]
title = "Blog posts"
uri_key = "blog-posts"
entity = "BlogPost"

[[resources]]
title = "Legacy blog posts"
uri_key = "blog_posts"
entity = "LegacyBlogPost"
"#;
        let err = Manifest::from_toml_str(content).unwrap_err();
        assert!(matches!(
            &err,
            RegistryError::DuplicateAlias { alias, first, second }
                if alias == "blogPosts" && first == "blog-posts" && second == "blog_posts"
        ));
        assert_eq!(
            err.to_string(),
            "resources blog-posts and blog_posts share the alias blogPosts"
        );
    }

    #[test]
    fn test_empty_entity_rejected() {
        let content = r#"
[[resources]]
title = "A"
uri_key = "posts"
entity = ""
"#;
        let err = Manifest::from_toml_str(content).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidResource { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let content = r#"
[[resources]]
title = "A"
uri_key = "posts"
entity = "Post"
icon = "heroicons.document"
"#;
        assert!(matches!(
            Manifest::from_toml_str(content),
            Err(RegistryError::TomlError(_))
        ));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::from_toml_str("").unwrap();
        assert!(manifest.is_empty());
    }
}
