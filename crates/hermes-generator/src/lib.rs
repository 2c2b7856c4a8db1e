//! # Hermes Generator
//!
//! Turns resource metadata into an OpenAPI 3.0 document.
//!
//! For every resource of a [`ResourceRegistry`](hermes_registry::ResourceRegistry),
//! in registry order, the generator registers:
//!
//! - a tag named after the resource alias (`blog-posts` → `blogPosts`)
//! - an object schema built from the index fields and a paginated
//!   `{Component}Collection` wrapper
//! - list, create, show, update, delete and mass-delete operations with
//!   ids `{alias}Index`, `{alias}Create`, `{alias}Show`, `{alias}Update`,
//!   `{alias}Delete` and `{alias}MassDelete`
//!
//! The document also carries one server entry and the login operation.
//!
//! ## Example
//!
//! ```no_run
//! use hermes_docs::ArtifactWriter;
//! use hermes_generator::{Generator, GeneratorSettings};
//! use hermes_registry::{Manifest, TemplateRouter};
//!
//! let registry = Manifest::from_file("resources.toml")?;
//! let router = TemplateRouter::new("http://localhost:8000");
//! let writer = ArtifactWriter::new("resources").json_format(true);
//!
//! let ok = Generator::new(GeneratorSettings::new("Admin")).run(&registry, &router, &writer)?;
//! assert!(ok);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod generator;
mod mapper;
mod naming;

pub use error::{GeneratorError, GeneratorResult};
pub use generator::{Generator, GeneratorSettings, DEFAULT_SERVER_DESCRIPTION};
pub use mapper::{
    collection_schema, field_to_schema, ids_parameter, object_schema, page_parameter,
    query_parameters, resource_item_parameter, sort_parameter, standard_responses,
    ResourceMapper, COLLECTION_SUFFIX, RESOURCE_ITEM_PARAMETER,
};
pub use naming::{alias, component_name, endpoint, ITEM_PLACEHOLDER};
