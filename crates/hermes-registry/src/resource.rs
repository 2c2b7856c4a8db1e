//! Resources and the registry that enumerates them.

use serde::{Deserialize, Serialize};

use crate::field::{Field, Filter};

/// Key column used when a resource does not declare one.
pub const DEFAULT_KEY_NAME: &str = "id";

/// A host-application entity exposed through CRUD routes.
pub trait Resource {
    /// Human title, used in operation summaries.
    fn title(&self) -> &str;

    /// URI key, e.g. `blog-posts`.
    fn uri_key(&self) -> &str;

    /// Type name of the underlying data entity. May be namespaced
    /// (`App\Models\BlogPost`, `app::models::BlogPost`).
    fn entity_type(&self) -> &str;

    /// Primary key column.
    fn key_name(&self) -> &str {
        DEFAULT_KEY_NAME
    }

    /// Fields shown in listings, in display order.
    fn index_fields(&self) -> &[Field];

    /// Fields accepted by create and update forms.
    fn form_fields(&self) -> &[Field];

    /// Listing filters.
    fn filters(&self) -> &[Filter];
}

/// An ordered collection of resources.
///
/// Iteration order is significant: it fixes tag and schema order in the
/// generated document.
pub trait ResourceRegistry {
    /// Resources in registration order.
    fn resources(&self) -> Vec<&dyn Resource>;
}

impl<R: Resource> ResourceRegistry for [R] {
    fn resources(&self) -> Vec<&dyn Resource> {
        self.iter().map(|r| r as &dyn Resource).collect()
    }
}

impl<R: Resource> ResourceRegistry for Vec<R> {
    fn resources(&self) -> Vec<&dyn Resource> {
        self.as_slice().resources()
    }
}

/// A resource described by data rather than code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDefinition {
    /// Human title.
    pub title: String,

    /// URI key.
    pub uri_key: String,

    /// Entity type name.
    pub entity: String,

    /// Primary key column.
    #[serde(default = "default_key_name")]
    pub key_name: String,

    /// Listing fields.
    #[serde(default)]
    pub index_fields: Vec<Field>,

    /// Form fields.
    #[serde(default)]
    pub form_fields: Vec<Field>,

    /// Listing filters.
    #[serde(default)]
    pub filters: Vec<Filter>,
}

fn default_key_name() -> String {
    DEFAULT_KEY_NAME.to_string()
}

impl ResourceDefinition {
    /// Create an empty definition.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        uri_key: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            uri_key: uri_key.into(),
            entity: entity.into(),
            key_name: default_key_name(),
            index_fields: Vec::new(),
            form_fields: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Set the primary key column.
    #[must_use]
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    /// Append a listing field.
    #[must_use]
    pub fn index_field(mut self, field: Field) -> Self {
        self.index_fields.push(field);
        self
    }

    /// Append a form field.
    #[must_use]
    pub fn form_field(mut self, field: Field) -> Self {
        self.form_fields.push(field);
        self
    }

    /// Append a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }
}

impl Resource for ResourceDefinition {
    fn title(&self) -> &str {
        &self.title
    }

    fn uri_key(&self) -> &str {
        &self.uri_key
    }

    fn entity_type(&self) -> &str {
        &self.entity
    }

    fn key_name(&self) -> &str {
        &self.key_name
    }

    fn index_fields(&self) -> &[Field] {
        &self.index_fields
    }

    fn form_fields(&self) -> &[Field] {
        &self.form_fields
    }

    fn filters(&self) -> &[Filter] {
        &self.filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_builder() {
        let resource = ResourceDefinition::new("Posts", "blog-posts", "App\\Models\\BlogPost")
            .index_field(Field::number("id"))
            .form_field(Field::new("title"))
            .filter(Filter::new("status"));

        assert_eq!(resource.title(), "Posts");
        assert_eq!(resource.uri_key(), "blog-posts");
        assert_eq!(resource.entity_type(), "App\\Models\\BlogPost");
        assert_eq!(resource.key_name(), "id");
        assert_eq!(resource.index_fields().len(), 1);
        assert_eq!(resource.form_fields().len(), 1);
        assert_eq!(resource.filters().len(), 1);
    }

    #[test]
    fn test_custom_key_name() {
        let resource = ResourceDefinition::new("Users", "users", "User").with_key_name("uuid");
        assert_eq!(resource.key_name(), "uuid");
    }

    #[test]
    fn test_vec_registry_keeps_order() {
        let registry = vec![
            ResourceDefinition::new("B", "b", "B"),
            ResourceDefinition::new("A", "a", "A"),
        ];

        let keys: Vec<_> = registry.resources().iter().map(|r| r.uri_key()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
