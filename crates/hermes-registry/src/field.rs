//! Field and filter descriptors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of field kinds the generator distinguishes.
///
/// Anything that is not numeric, a belongs-to relation or a password is
/// plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Numeric input.
    Number,
    /// Foreign key to another resource.
    BelongsTo,
    /// Password input.
    Password,
    /// Any other input.
    #[default]
    Text,
}

/// What the generator needs to know about a field or filter.
pub trait FieldDescriptor {
    /// Kind of the field.
    fn kind(&self) -> FieldKind;

    /// Declared default value. `None` when no default is declared or the
    /// declared default is `null`.
    fn default_value(&self) -> Option<&Value>;
}

/// A resource field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    /// Column (attribute) name.
    pub column: String,

    /// Field kind.
    #[serde(default)]
    pub kind: FieldKind,

    /// Whether listings can be sorted by this field.
    #[serde(default)]
    pub sortable: bool,

    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Field {
    /// Create a text field for `column`.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            kind: FieldKind::Text,
            sortable: false,
            default: None,
        }
    }

    /// Create a numeric field.
    #[must_use]
    pub fn number(column: impl Into<String>) -> Self {
        Self::new(column).with_kind(FieldKind::Number)
    }

    /// Create a belongs-to relation field.
    #[must_use]
    pub fn belongs_to(column: impl Into<String>) -> Self {
        Self::new(column).with_kind(FieldKind::BelongsTo)
    }

    /// Create a password field.
    #[must_use]
    pub fn password(column: impl Into<String>) -> Self {
        Self::new(column).with_kind(FieldKind::Password)
    }

    /// Set the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as sortable.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl FieldDescriptor for Field {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().filter(|v| !v.is_null())
    }
}

/// A listing filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    /// Query parameter name.
    pub name: String,

    /// Kind of the filtered value.
    #[serde(default)]
    pub kind: FieldKind,

    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Grouped filters accept several identifiers at once.
    #[serde(default)]
    pub group: bool,
}

impl Filter {
    /// Create a scalar text filter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            default: None,
            group: false,
        }
    }

    /// Create a grouped filter.
    #[must_use]
    pub fn grouped(name: impl Into<String>) -> Self {
        Self {
            group: true,
            ..Self::new(name)
        }
    }

    /// Set the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl FieldDescriptor for Filter {
    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().filter(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_builders() {
        let field = Field::number("id").sortable();
        assert_eq!(field.kind(), FieldKind::Number);
        assert_eq!(field.column, "id");
        assert!(field.sortable);

        assert_eq!(Field::belongs_to("author_id").kind, FieldKind::BelongsTo);
        assert_eq!(Field::password("password").kind, FieldKind::Password);
    }

    #[test]
    fn test_null_default_is_absent() {
        let field = Field::new("title").with_default(Value::Null);
        assert!(field.default_value().is_none());

        let filter = Filter::new("status").with_default(Value::Null);
        assert!(filter.default_value().is_none());
    }

    #[test]
    fn test_falsy_default_is_kept() {
        let field = Field::number("views").with_default(0);
        assert_eq!(field.default_value(), Some(&Value::from(0)));

        let field = Field::new("published").with_default(false);
        assert_eq!(field.default_value(), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_kind_names() {
        let kinds: Vec<FieldKind> =
            serde_json::from_str(r#"["number", "belongs_to", "password", "text"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Number,
                FieldKind::BelongsTo,
                FieldKind::Password,
                FieldKind::Text
            ]
        );
        assert_eq!(FieldKind::default(), FieldKind::Text);
    }

    #[test]
    fn test_field_deserialize_defaults() {
        let field: Field = serde_json::from_str(r#"{"column": "title"}"#).unwrap();
        assert_eq!(field, Field::new("title"));

        let result: Result<Field, _> =
            serde_json::from_str(r#"{"column": "title", "colour": "red"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_grouped_filter() {
        let filter = Filter::grouped("tags").with_kind(FieldKind::BelongsTo);
        assert!(filter.group);
        assert_eq!(filter.kind(), FieldKind::BelongsTo);
        assert!(!Filter::new("status").group);
    }
}
