//! Named route resolution.
//!
//! Resolved URLs are absolute (prefixed with the application's home URL),
//! which is how the generator receives them from a host router.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// Placeholder for the resource URI key in route templates.
pub const RESOURCE_MARKER: &str = "{resource}";

/// Placeholder for the resource item identifier in route templates.
pub const ITEM_MARKER: &str = "{resourceItem}";

/// Default template for collection routes.
pub const DEFAULT_COLLECTION_TEMPLATE: &str = "/resource/{resource}/crud";

/// Default template for item routes.
pub const DEFAULT_ITEM_TEMPLATE: &str = "/resource/{resource}/crud/{resourceItem}";

/// Name of the login route.
pub const AUTHENTICATE_ROUTE: &str = "authenticate";

/// The CRUD routes every resource exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrudRoute {
    /// List resources.
    #[serde(rename = "crud.index")]
    Index,
    /// Create a resource.
    #[serde(rename = "crud.store")]
    Store,
    /// Read one resource.
    #[serde(rename = "crud.show")]
    Show,
    /// Update one resource.
    #[serde(rename = "crud.update")]
    Update,
    /// Delete one resource.
    #[serde(rename = "crud.destroy")]
    Destroy,
    /// Delete several resources.
    #[serde(rename = "crud.massDelete")]
    MassDelete,
}

impl CrudRoute {
    /// Every route, in declaration order.
    pub const ALL: [CrudRoute; 6] = [
        Self::Index,
        Self::Store,
        Self::Show,
        Self::Update,
        Self::Destroy,
        Self::MassDelete,
    ];

    /// Route name, e.g. `crud.index`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Index => "crud.index",
            Self::Store => "crud.store",
            Self::Show => "crud.show",
            Self::Update => "crud.update",
            Self::Destroy => "crud.destroy",
            Self::MassDelete => "crud.massDelete",
        }
    }

    /// Whether the route addresses a single item.
    #[must_use]
    pub fn is_item_route(&self) -> bool {
        matches!(self, Self::Show | Self::Update | Self::Destroy)
    }

    /// Template used when none is configured.
    #[must_use]
    pub fn default_template(&self) -> &'static str {
        if self.is_item_route() {
            DEFAULT_ITEM_TEMPLATE
        } else {
            DEFAULT_COLLECTION_TEMPLATE
        }
    }
}

impl fmt::Display for CrudRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CrudRoute {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.name() == s)
            .ok_or_else(|| RegistryError::UnknownRoute(s.to_string()))
    }
}

/// Resolves named routes to URLs.
pub trait RouteResolver {
    /// The application's home URL. Resolved URLs start with it.
    fn home(&self) -> &str;

    /// Resolve a named application route.
    fn named(&self, name: &str) -> RegistryResult<String>;

    /// Resolve a CRUD route of the resource with `uri_key`. `item` is
    /// substituted verbatim for the item parameter.
    fn resource(&self, uri_key: &str, route: CrudRoute, item: Option<&str>)
        -> RegistryResult<String>;
}

/// Route resolver driven by path templates.
///
/// # Example
///
/// ```
/// use hermes_registry::{CrudRoute, RouteResolver, TemplateRouter};
///
/// let router = TemplateRouter::new("https://admin.example.com");
/// let url = router.resource("posts", CrudRoute::Show, Some("42")).unwrap();
/// assert_eq!(url, "https://admin.example.com/resource/posts/crud/42");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateRouter {
    home: String,
    named: BTreeMap<String, String>,
    templates: BTreeMap<CrudRoute, String>,
}

impl TemplateRouter {
    /// Create a router for an application served at `home`.
    ///
    /// The `authenticate` route is registered at `/authenticate`.
    #[must_use]
    pub fn new(home: impl Into<String>) -> Self {
        let home = home.into().trim_end_matches('/').to_string();
        let mut named = BTreeMap::new();
        named.insert(AUTHENTICATE_ROUTE.to_string(), "/authenticate".to_string());

        Self {
            home,
            named,
            templates: BTreeMap::new(),
        }
    }

    /// Register or replace a named route.
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.named.insert(name.into(), path.into());
        self
    }

    /// Override the template of a CRUD route.
    #[must_use]
    pub fn with_template(mut self, route: CrudRoute, template: impl Into<String>) -> Self {
        self.templates.insert(route, template.into());
        self
    }

    /// Template in effect for `route`.
    #[must_use]
    pub fn template(&self, route: CrudRoute) -> &str {
        self.templates
            .get(&route)
            .map(String::as_str)
            .unwrap_or_else(|| route.default_template())
    }

    fn absolute(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.home, path)
        } else {
            format!("{}/{}", self.home, path)
        }
    }
}

impl RouteResolver for TemplateRouter {
    fn home(&self) -> &str {
        &self.home
    }

    fn named(&self, name: &str) -> RegistryResult<String> {
        self.named
            .get(name)
            .map(|path| self.absolute(path))
            .ok_or_else(|| RegistryError::UnknownRoute(name.to_string()))
    }

    fn resource(
        &self,
        uri_key: &str,
        route: CrudRoute,
        item: Option<&str>,
    ) -> RegistryResult<String> {
        let template = self.template(route);
        let mut path = template.replace(RESOURCE_MARKER, uri_key);

        if path.contains(ITEM_MARKER) {
            let item = item.ok_or(RegistryError::MissingParameter {
                route,
                parameter: "resourceItem",
            })?;
            path = path.replace(ITEM_MARKER, item);
        }

        Ok(self.absolute(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_names_round_trip() {
        for route in CrudRoute::ALL {
            assert_eq!(route.name().parse::<CrudRoute>().unwrap(), route);
            assert_eq!(route.to_string(), route.name());
        }
        assert!("crud.edit".parse::<CrudRoute>().is_err());
    }

    #[test]
    fn test_route_serde_names() {
        let route: CrudRoute = serde_json::from_str("\"crud.massDelete\"").unwrap();
        assert_eq!(route, CrudRoute::MassDelete);
    }

    #[test]
    fn test_default_templates() {
        let router = TemplateRouter::new("http://localhost:8000/");
        assert_eq!(router.home(), "http://localhost:8000");

        assert_eq!(
            router.resource("posts", CrudRoute::Index, None).unwrap(),
            "http://localhost:8000/resource/posts/crud"
        );
        assert_eq!(
            router.resource("posts", CrudRoute::MassDelete, None).unwrap(),
            "http://localhost:8000/resource/posts/crud"
        );
        assert_eq!(
            router
                .resource("posts", CrudRoute::Update, Some("!resourceItem!"))
                .unwrap(),
            "http://localhost:8000/resource/posts/crud/!resourceItem!"
        );
    }

    #[test]
    fn test_item_route_without_item_fails() {
        let router = TemplateRouter::new("http://localhost:8000");
        let err = router.resource("posts", CrudRoute::Show, None).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::MissingParameter {
                route: CrudRoute::Show,
                ..
            }
        ));
    }

    #[test]
    fn test_named_routes() {
        let router = TemplateRouter::new("https://admin.example.com")
            .with_route("logout", "logout");

        assert_eq!(
            router.named("authenticate").unwrap(),
            "https://admin.example.com/authenticate"
        );
        assert_eq!(
            router.named("logout").unwrap(),
            "https://admin.example.com/logout"
        );
        assert!(matches!(
            router.named("missing"),
            Err(RegistryError::UnknownRoute(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_template_override() {
        let router = TemplateRouter::new("https://admin.example.com/api")
            .with_template(CrudRoute::Index, "/{resource}")
            .with_template(CrudRoute::Show, "/{resource}/{resourceItem}");

        assert_eq!(router.template(CrudRoute::Store), DEFAULT_COLLECTION_TEMPLATE);
        assert_eq!(
            router.resource("posts", CrudRoute::Index, None).unwrap(),
            "https://admin.example.com/api/posts"
        );
        assert_eq!(
            router.resource("posts", CrudRoute::Show, Some("7")).unwrap(),
            "https://admin.example.com/api/posts/7"
        );
    }
}
