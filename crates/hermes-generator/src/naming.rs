//! Names and paths derived from resource metadata.

use std::sync::OnceLock;

use heck::ToLowerCamelCase;
use regex::{Captures, Regex};

/// Literal passed to the router for the item parameter; rewritten to
/// `{resourceItem}` by [`endpoint`].
pub const ITEM_PLACEHOLDER: &str = "!resourceItem!";

/// Schema component name of an entity type: its bare type identifier.
///
/// ```
/// use hermes_generator::component_name;
///
/// assert_eq!(component_name("App\\Models\\BlogPost"), "BlogPost");
/// assert_eq!(component_name("app::models::BlogPost"), "BlogPost");
/// assert_eq!(component_name("BlogPost"), "BlogPost");
/// ```
pub fn component_name(entity_type: &str) -> &str {
    entity_type
        .rsplit([':', '\\', '.', '/'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(entity_type)
}

/// Tag name and operation-id prefix of a resource.
///
/// ```
/// use hermes_generator::alias;
///
/// assert_eq!(alias("blog-posts"), "blogPosts");
/// ```
pub fn alias(uri_key: &str) -> String {
    uri_key.to_lower_camel_case()
}

/// Turn a resolved URL into a document path.
///
/// `!name!` markers become `{name}` placeholders and the application's home
/// URL is stripped.
pub fn endpoint(url: &str, home: &str) -> String {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    let re = MARKER.get_or_init(|| Regex::new(r"!(.*?)!").expect("valid regex"));

    let rewritten = re.replace_all(url, |caps: &Captures<'_>| format!("{{{}}}", &caps[1]));
    let path = rewritten.strip_prefix(home).unwrap_or(&rewritten);

    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
