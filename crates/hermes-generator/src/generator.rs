//! The generation run.

use hermes_docs::{ArtifactWriter, DocumentBuilder, Info};
use hermes_registry::{ResourceRegistry, RouteResolver, AUTHENTICATE_ROUTE};
use tracing::{debug, info};

use crate::error::GeneratorResult;
use crate::mapper::ResourceMapper;
use crate::naming::endpoint;

/// Description attached to the single server entry.
pub const DEFAULT_SERVER_DESCRIPTION: &str = "Production API server";

/// Document-level settings of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// `info.title`.
    pub title: String,
    /// `info.description`.
    pub description: String,
    /// `info.version`.
    pub version: String,
    /// Description of the server entry.
    pub server_description: String,
    /// Named route of the login operation.
    pub login_route: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: "1.0.0".to_string(),
            server_description: DEFAULT_SERVER_DESCRIPTION.to_string(),
            login_route: AUTHENTICATE_ROUTE.to_string(),
        }
    }
}

impl GeneratorSettings {
    /// Settings with the given title and defaults elsewhere.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the server description.
    #[must_use]
    pub fn server_description(mut self, description: impl Into<String>) -> Self {
        self.server_description = description.into();
        self
    }

    /// Set the login route name.
    #[must_use]
    pub fn login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }
}

/// Builds OpenAPI documents from a resource registry.
///
/// # Example
///
/// ```
/// use hermes_docs::HttpMethod;
/// use hermes_generator::{Generator, GeneratorSettings};
/// use hermes_registry::{Field, ResourceDefinition, TemplateRouter};
///
/// let registry = vec![ResourceDefinition::new("Posts", "blog-posts", "BlogPost")
///     .index_field(Field::number("id"))];
/// let router = TemplateRouter::new("http://localhost:8000");
///
/// let generator = Generator::new(GeneratorSettings::new("Admin"));
/// let spec = generator.document(&registry, &router).unwrap().snapshot();
///
/// assert_eq!(spec.paths["/resource/blog-posts/crud"][&HttpMethod::Get].operation_id, "blogPostsIndex");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Generator {
    settings: GeneratorSettings,
}

impl Generator {
    /// Create a generator.
    #[must_use]
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Settings in use.
    #[must_use]
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Build the document for every resource in `registry`.
    ///
    /// Resources are mapped in registry order.
    pub fn document<G, R>(&self, registry: &G, router: &R) -> GeneratorResult<DocumentBuilder>
    where
        G: ResourceRegistry + ?Sized,
        R: RouteResolver + ?Sized,
    {
        let home = router.home();
        let mut builder = DocumentBuilder::new(
            Info::new(self.settings.title.clone())
                .with_description(self.settings.description.clone())
                .with_version(self.settings.version.clone()),
        );

        builder.add_server(home, self.settings.server_description.clone());

        let login = router.named(&self.settings.login_route)?;
        builder.add_authentication_path(endpoint(&login, home));

        for resource in registry.resources() {
            let mapper = ResourceMapper::new(resource, router);
            let operations = mapper.map(&mut builder)?;
            debug!(
                alias = %mapper.alias(),
                component = %mapper.component(),
                operations,
                "mapped resource"
            );
        }

        Ok(builder)
    }

    /// Build the document and write it with `writer`.
    ///
    /// Returns `Ok(false)` when writing failed outside debug mode.
    pub fn run<G, R>(
        &self,
        registry: &G,
        router: &R,
        writer: &ArtifactWriter,
    ) -> GeneratorResult<bool>
    where
        G: ResourceRegistry + ?Sized,
        R: RouteResolver + ?Sized,
    {
        let builder = self.document(registry, router)?;
        let written = writer.build(&builder)?;

        let spec = builder.document();
        info!(
            resources = registry.resources().len(),
            paths = spec.paths.len(),
            schemas = spec.components.schemas.len(),
            dir = %writer.dir().display(),
            success = written,
            "OpenAPI generation finished"
        );

        Ok(written)
    }
}
