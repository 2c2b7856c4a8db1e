//! # Hermes Registry
//!
//! The metadata Hermes reads to describe an application's API.
//!
//! - [`Resource`] and [`ResourceRegistry`]: the resources to document, with
//!   their fields and filters
//! - [`RouteResolver`]: named route resolution, including the six CRUD routes
//!   of every resource
//! - [`Manifest`] and [`TemplateRouter`]: data-driven implementations of both
//!
//! ## Example
//!
//! ```
//! use hermes_registry::{Field, ResourceDefinition, ResourceRegistry};
//!
//! let registry = vec![ResourceDefinition::new("Blog posts", "blog-posts", "BlogPost")
//!     .index_field(Field::number("id"))
//!     .index_field(Field::new("title").sortable())];
//!
//! assert_eq!(registry.resources().len(), 1);
//! ```

mod error;
mod field;
mod manifest;
mod resource;
mod routes;

pub use error::{RegistryError, RegistryResult};
pub use field::{Field, FieldDescriptor, FieldKind, Filter};
pub use manifest::Manifest;
pub use resource::{Resource, ResourceDefinition, ResourceRegistry, DEFAULT_KEY_NAME};
pub use routes::{
    CrudRoute, RouteResolver, TemplateRouter, AUTHENTICATE_ROUTE, DEFAULT_COLLECTION_TEMPLATE,
    DEFAULT_ITEM_TEMPLATE, ITEM_MARKER, RESOURCE_MARKER,
};
