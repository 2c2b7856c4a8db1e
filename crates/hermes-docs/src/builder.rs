//! Accumulating document builder.
//!
//! [`DocumentBuilder`] owns one OpenAPI document for the duration of a
//! generation run. Every write is an upsert at a well-defined key (tag name,
//! schema name, response name, path and method), so rebuilding from the same
//! metadata is idempotent.

use indexmap::IndexMap;

use crate::openapi::{
    Components, HttpMethod, Info, OpenApi, Operation, Response, ResponseEntry, Schema,
    SecurityRequirement, SecurityScheme, Server, Tag, OPENAPI_VERSION,
};

/// Name of the bearer security scheme every authenticated operation uses.
pub const JWT_SCHEME: &str = "jwtAuth";

/// Tag under which the login operation is grouped.
pub const AUTHENTICATION_TAG: &str = "Authentication";

/// Shared response component for 401 replies.
pub const UNAUTHORIZED_RESPONSE: &str = "Unauthorized";

/// Shared response component for plain success replies.
pub const SUCCESS_RESPONSE: &str = "Success";

/// Shared response component for 422 replies.
pub const VALIDATION_RESPONSE: &str = "ValidationException";

/// Builder for a single OpenAPI document.
///
/// # Example
///
/// ```
/// use hermes_docs::{DocumentBuilder, HttpMethod, Info, Operation};
///
/// let mut builder = DocumentBuilder::new(Info::new("Admin API"));
/// builder
///     .add_server("https://admin.example.com", "Production API server")
///     .add_tag("users")
///     .add_path("/users", HttpMethod::Get, Operation::new("usersIndex").tag("users"));
///
/// let spec = builder.snapshot();
/// assert!(spec.paths["/users"][&HttpMethod::Get].security.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    document: OpenApi,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(Info::default())
    }
}

impl DocumentBuilder {
    /// Create a builder seeded with the fixed security scheme and the
    /// `Unauthorized`, `Success` and `ValidationException` responses.
    #[must_use]
    pub fn new(info: Info) -> Self {
        let mut components = Components::default();
        components
            .security_schemes
            .insert(JWT_SCHEME.to_string(), SecurityScheme::bearer_jwt());
        components.responses.insert(
            UNAUTHORIZED_RESPONSE.to_string(),
            Response::json("Unauthorized", message_schema()),
        );
        components.responses.insert(
            SUCCESS_RESPONSE.to_string(),
            Response::json("Successful", message_schema()),
        );
        components.responses.insert(
            VALIDATION_RESPONSE.to_string(),
            Response::json(
                "Validation errors",
                message_schema().property(
                    "errors",
                    Schema::object().additional_properties(Schema::array(Schema::string())),
                ),
            ),
        );

        Self {
            document: OpenApi {
                openapi: OPENAPI_VERSION.to_string(),
                info,
                servers: Vec::new(),
                paths: IndexMap::new(),
                components,
                tags: IndexMap::new(),
            },
        }
    }

    /// Replace `info` wholesale.
    pub fn set_info(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        version: impl Into<String>,
    ) -> &mut Self {
        self.document.info = Info {
            title: title.into(),
            description: description.into(),
            version: version.into(),
        };
        self
    }

    /// Append a server. Duplicates are kept.
    pub fn add_server(
        &mut self,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.document.servers.push(Server {
            url: url.into(),
            description: description.into(),
        });
        self
    }

    /// Declare a tag. The first declaration fixes its position.
    pub fn add_tag(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.document
            .tags
            .insert(name.clone(), Tag { name });
        self
    }

    /// Insert or replace a named schema component.
    pub fn add_schema_component(&mut self, name: impl Into<String>, schema: Schema) -> &mut Self {
        self.document.components.schemas.insert(name.into(), schema);
        self
    }

    /// Insert or replace a named response component.
    pub fn add_response_component(
        &mut self,
        name: impl Into<String>,
        response: Response,
    ) -> &mut Self {
        self.document.components.responses.insert(name.into(), response);
        self
    }

    /// Register an authenticated operation, replacing any previous one at the
    /// same path and method.
    pub fn add_path(
        &mut self,
        path: impl Into<String>,
        method: HttpMethod,
        operation: Operation,
    ) -> &mut Self {
        self.insert_operation(path.into(), method, operation, true)
    }

    /// Register an operation that carries no security requirement.
    pub fn add_public_path(
        &mut self,
        path: impl Into<String>,
        method: HttpMethod,
        operation: Operation,
    ) -> &mut Self {
        self.insert_operation(path.into(), method, operation, false)
    }

    /// Register the `Authentication` tag and the login operation at `login_path`.
    pub fn add_authentication_path(&mut self, login_path: impl Into<String>) -> &mut Self {
        let body = Schema::object()
            .property(
                "username",
                Schema::string().with_example("example@example.com"),
            )
            .property("password", Schema::string().with_example("***"));

        let token = Schema::object().property(
            "token",
            Schema::string().with_example("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."),
        );

        let operation = Operation::new("authenticate")
            .tag(AUTHENTICATION_TAG)
            .summary("User login")
            .json_body(body)
            .response("200", Response::json("Successful", token).into())
            .response("401", ResponseEntry::component(UNAUTHORIZED_RESPONSE))
            .response("422", ResponseEntry::component(VALIDATION_RESPONSE));

        self.add_tag(AUTHENTICATION_TAG)
            .add_public_path(login_path, HttpMethod::Post, operation)
    }

    /// Immutable copy of the accumulated document.
    #[must_use]
    pub fn snapshot(&self) -> OpenApi {
        self.document.clone()
    }

    /// Borrow the accumulated document.
    #[must_use]
    pub fn document(&self) -> &OpenApi {
        &self.document
    }

    fn insert_operation(
        &mut self,
        path: String,
        method: HttpMethod,
        mut operation: Operation,
        requires_auth: bool,
    ) -> &mut Self {
        if requires_auth {
            operation.security = Some(vec![jwt_requirement()]);
        }

        self.document
            .paths
            .entry(path)
            .or_default()
            .insert(method, operation);
        self
    }
}

/// The single global security requirement: `jwtAuth` with no scopes.
#[must_use]
pub fn jwt_requirement() -> SecurityRequirement {
    let mut requirement = IndexMap::new();
    requirement.insert(JWT_SCHEME.to_string(), Vec::new());
    requirement
}

fn message_schema() -> Schema {
    Schema::object().property("message", Schema::string())
}
