//! Resource-to-document mapping.
//!
//! [`ResourceMapper`] derives every fragment of one resource (object and
//! collection schemas, list parameters, the six CRUD operations) and feeds
//! them into a [`DocumentBuilder`].

use hermes_docs::{
    DocumentBuilder, HttpMethod, Operation, Parameter, Response, ResponseEntry, Schema,
    SUCCESS_RESPONSE, UNAUTHORIZED_RESPONSE, VALIDATION_RESPONSE,
};
use hermes_registry::{CrudRoute, Field, FieldDescriptor, FieldKind, Resource, RouteResolver};
use indexmap::IndexMap;
use tracing::debug;

use crate::error::GeneratorResult;
use crate::naming::{alias, component_name, endpoint, ITEM_PLACEHOLDER};

/// Name of the path parameter identifying one item.
pub const RESOURCE_ITEM_PARAMETER: &str = "resourceItem";

/// Suffix of the collection wrapper schema.
pub const COLLECTION_SUFFIX: &str = "Collection";

/// Map a field or filter to its schema.
///
/// Numeric and belongs-to fields are integers, passwords are strings with
/// `format: password`, everything else is a string. A declared default is
/// carried over; nothing is emitted for absent attributes.
pub fn field_to_schema<F: FieldDescriptor + ?Sized>(field: &F) -> Schema {
    let schema = match field.kind() {
        FieldKind::Number | FieldKind::BelongsTo => Schema::integer(),
        FieldKind::Password => Schema::string().with_format("password"),
        FieldKind::Text => Schema::string(),
    };

    match field.default_value() {
        Some(default) => schema.with_default(default.clone()),
        None => schema,
    }
}

/// Object schema with one property per field, in field order.
pub fn object_schema<'a, I>(fields: I) -> Schema
where
    I: IntoIterator<Item = &'a Field>,
{
    Schema::object().with_properties(
        fields
            .into_iter()
            .map(|field| (field.column.clone(), field_to_schema(field)))
            .collect(),
    )
}

/// Paginated envelope around a list of `component` items.
pub fn collection_schema(component: &str) -> Schema {
    Schema::object()
        .property("current_page", Schema::integer().with_default(1))
        .property("first_page_url", Schema::string())
        .property("from", Schema::integer().with_default(1))
        .property("next_page_url", Schema::string().nullable())
        .property("prev_page_url", Schema::string().nullable())
        .property("to", Schema::integer())
        .property("path", Schema::string())
        .property("per_page", Schema::integer())
        .property("data", Schema::array(Schema::component(component)))
}

/// `sort` parameter listing every sortable field ascending and descending.
///
/// Returns `None` when no field is sortable.
pub fn sort_parameter(fields: &[Field]) -> Option<Parameter> {
    let values: Vec<String> = fields
        .iter()
        .filter(|field| field.sortable)
        .flat_map(|field| [field.column.clone(), format!("-{}", field.column)])
        .collect();

    if values.is_empty() {
        return None;
    }

    Some(Parameter::query("sort", Schema::string().with_enum(values)))
}

/// Trailing `page` parameter of every listing.
pub fn page_parameter() -> Parameter {
    Parameter::query("page", Schema::integer().with_default(1)).with_example(1)
}

/// Query parameters of the list operation: filters, then `sort`, then `page`.
pub fn query_parameters(resource: &dyn Resource) -> Vec<Parameter> {
    let mut parameters: Vec<Parameter> = resource
        .filters()
        .iter()
        .map(|filter| {
            if filter.group {
                Parameter::query(filter.name.clone(), Schema::array(Schema::integer()))
                    .deep_object()
            } else {
                Parameter::query(filter.name.clone(), field_to_schema(filter))
            }
        })
        .collect();

    parameters.extend(sort_parameter(resource.index_fields()));
    parameters.push(page_parameter());
    parameters
}

/// Path parameter accepting an integer or string identifier.
pub fn resource_item_parameter() -> Parameter {
    Parameter::path(
        RESOURCE_ITEM_PARAMETER,
        Schema::one_of(vec![Schema::integer(), Schema::string()]),
    )
}

/// Required `ids` parameter of the mass-delete operation.
pub fn ids_parameter() -> Parameter {
    Parameter::query("ids", Schema::array(Schema::integer())).required()
}

/// `200` and `201` success, `401` and `422` errors, all by reference.
pub fn standard_responses() -> IndexMap<String, ResponseEntry> {
    let mut responses = IndexMap::new();
    responses.insert("200".to_string(), ResponseEntry::component(SUCCESS_RESPONSE));
    responses.insert("201".to_string(), ResponseEntry::component(SUCCESS_RESPONSE));
    responses.insert(
        "401".to_string(),
        ResponseEntry::component(UNAUTHORIZED_RESPONSE),
    );
    responses.insert(
        "422".to_string(),
        ResponseEntry::component(VALIDATION_RESPONSE),
    );
    responses
}

fn standard_responses_without(status: &str) -> IndexMap<String, ResponseEntry> {
    let mut responses = standard_responses();
    responses.shift_remove(status);
    responses
}

fn successful(schema: Schema) -> ResponseEntry {
    Response::json("Successful", schema).into()
}

/// Maps one resource into a document.
pub struct ResourceMapper<'a, R: RouteResolver + ?Sized> {
    resource: &'a dyn Resource,
    router: &'a R,
    component: String,
    alias: String,
}

impl<'a, R: RouteResolver + ?Sized> ResourceMapper<'a, R> {
    /// Create a mapper for `resource`, resolving paths through `router`.
    pub fn new(resource: &'a dyn Resource, router: &'a R) -> Self {
        Self {
            component: component_name(resource.entity_type()).to_string(),
            alias: alias(resource.uri_key()),
            resource,
            router,
        }
    }

    /// Schema component name.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Tag and operation-id prefix.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Operation id for `action`, e.g. `blogPostsIndex`.
    pub fn operation_id(&self, action: &str) -> String {
        format!("{}{action}", self.alias)
    }

    /// Register the resource's tag, schemas and operations. Returns the
    /// number of operations registered.
    pub fn map(&self, builder: &mut DocumentBuilder) -> GeneratorResult<usize> {
        builder
            .add_schema_component(
                self.component.clone(),
                object_schema(self.resource.index_fields()),
            )
            .add_schema_component(
                format!("{}{COLLECTION_SUFFIX}", self.component),
                collection_schema(&self.component),
            )
            .add_tag(self.alias.clone());

        let operations = [
            (CrudRoute::Index, HttpMethod::Get, self.index_operation()),
            (CrudRoute::Update, HttpMethod::Put, self.update_operation()),
            (CrudRoute::Store, HttpMethod::Post, self.create_operation()),
            (CrudRoute::Show, HttpMethod::Get, self.show_operation()),
            (CrudRoute::Destroy, HttpMethod::Delete, self.delete_operation()),
            (
                CrudRoute::MassDelete,
                HttpMethod::Delete,
                self.mass_delete_operation(),
            ),
        ];

        let count = operations.len();
        for (route, method, operation) in operations {
            let path = self.path(route)?;
            debug!(
                alias = %self.alias,
                operation_id = %operation.operation_id,
                method = %method,
                path = %path,
                "registered operation"
            );
            builder.add_path(path, method, operation);
        }

        Ok(count)
    }

    /// Document path of `route`.
    pub fn path(&self, route: CrudRoute) -> GeneratorResult<String> {
        let item = route.is_item_route().then_some(ITEM_PLACEHOLDER);
        let url = self.router.resource(self.resource.uri_key(), route, item)?;
        Ok(endpoint(&url, self.router.home()))
    }

    fn operation(&self, action: &str, summary: &str) -> Operation {
        Operation::new(self.operation_id(action))
            .tag(self.alias.clone())
            .summary(format!("{} - {summary}", self.resource.title()))
    }

    fn form_schema(&self, exclude_key: bool) -> Schema {
        let key = self.resource.key_name();
        object_schema(
            self.resource
                .form_fields()
                .iter()
                .filter(|field| !(exclude_key && field.column == key)),
        )
    }

    fn index_operation(&self) -> Operation {
        self.operation("Index", "Listing")
            .parameters(query_parameters(self.resource))
            .response(
                "200",
                successful(Schema::component(&format!(
                    "{}{COLLECTION_SUFFIX}",
                    self.component
                ))),
            )
            .response("401", ResponseEntry::component(UNAUTHORIZED_RESPONSE))
    }

    fn update_operation(&self) -> Operation {
        self.operation("Update", "Update")
            .parameter(resource_item_parameter())
            .json_body(self.form_schema(false))
            .responses(standard_responses_without("201"))
    }

    fn create_operation(&self) -> Operation {
        self.operation("Create", "Create")
            .json_body(self.form_schema(true))
            .responses(standard_responses_without("200"))
    }

    fn show_operation(&self) -> Operation {
        self.operation("Show", "Show")
            .parameter(resource_item_parameter())
            .response("200", successful(Schema::component(&self.component)))
            .response("401", ResponseEntry::component(UNAUTHORIZED_RESPONSE))
    }

    fn delete_operation(&self) -> Operation {
        self.operation("Delete", "Delete")
            .parameter(resource_item_parameter())
            .responses(standard_responses())
    }

    fn mass_delete_operation(&self) -> Operation {
        self.operation("MassDelete", "Mass delete")
            .parameter(ids_parameter())
            .responses(standard_responses())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_docs::{Info, ParameterIn, ParameterStyle, SchemaType};
    use hermes_registry::{Filter, ResourceDefinition, TemplateRouter};
    use serde_json::{json, Value};

    fn posts() -> ResourceDefinition {
        ResourceDefinition::new("Posts", "blog-posts", "App\\Models\\BlogPost")
            .index_field(Field::number("id").sortable())
            .index_field(Field::new("title").sortable())
            .index_field(Field::belongs_to("author_id"))
            .form_field(Field::number("id"))
            .form_field(Field::new("title").with_default("Untitled"))
            .form_field(Field::password("secret"))
            .filter(Filter::new("status").with_default("draft"))
            .filter(Filter::grouped("tags"))
    }

    fn to_json(schema: &Schema) -> Value {
        serde_json::to_value(schema).unwrap()
    }

    #[test]
    fn test_field_to_schema_kinds() {
        assert_eq!(to_json(&field_to_schema(&Field::number("n"))), json!({"type": "integer"}));
        assert_eq!(
            to_json(&field_to_schema(&Field::belongs_to("b"))),
            json!({"type": "integer"})
        );
        assert_eq!(
            to_json(&field_to_schema(&Field::password("p"))),
            json!({"type": "string", "format": "password"})
        );
        assert_eq!(to_json(&field_to_schema(&Field::new("t"))), json!({"type": "string"}));
    }

    #[test]
    fn test_field_to_schema_defaults() {
        assert_eq!(
            to_json(&field_to_schema(&Field::number("views").with_default(0))),
            json!({"type": "integer", "default": 0})
        );
        assert_eq!(
            to_json(&field_to_schema(&Field::new("title").with_default(Value::Null))),
            json!({"type": "string"})
        );
        assert_eq!(
            to_json(&field_to_schema(&Filter::new("status").with_default("draft"))),
            json!({"type": "string", "default": "draft"})
        );
    }

    #[test]
    fn test_collection_schema() {
        let schema = to_json(&collection_schema("BlogPost"));
        assert_eq!(schema["properties"]["current_page"], json!({"type": "integer", "default": 1}));
        assert_eq!(
            schema["properties"]["next_page_url"],
            json!({"type": "string", "nullable": true})
        );
        assert_eq!(
            schema["properties"]["data"],
            json!({"type": "array", "items": {"$ref": "#/components/schemas/BlogPost"}})
        );

        let keys: Vec<_> = schema["properties"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn test_query_parameters_order() {
        let resource = posts();
        let names: Vec<_> = query_parameters(&resource)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["status", "tags", "sort", "page"]);
    }

    #[test]
    fn test_grouped_filter_parameter() {
        let resource = posts();
        let tags = query_parameters(&resource).remove(1);
        assert_eq!(tags.style, Some(ParameterStyle::DeepObject));
        assert_eq!(tags.explode, Some(true));
        assert!(!tags.required);
        assert_eq!(to_json(&tags.schema), json!({"type": "array", "items": {"type": "integer"}}));
    }

    #[test]
    fn test_sort_parameter() {
        let resource = posts();
        let sort = sort_parameter(resource.index_fields()).unwrap();
        assert_eq!(
            sort.schema.enum_values,
            vec![json!("id"), json!("-id"), json!("title"), json!("-title")]
        );

        assert!(sort_parameter(&[Field::new("title")]).is_none());
    }

    #[test]
    fn test_page_parameter() {
        let page = page_parameter();
        assert_eq!(page.location, ParameterIn::Query);
        assert_eq!(page.example, Some(json!(1)));
        assert_eq!(page.schema.default, Some(json!(1)));
    }

    #[test]
    fn test_resource_item_parameter() {
        let parameter = resource_item_parameter();
        assert_eq!(parameter.location, ParameterIn::Path);
        assert!(parameter.required);
        assert_eq!(
            to_json(&parameter.schema),
            json!({"oneOf": [{"type": "integer"}, {"type": "string"}]})
        );
    }

    #[test]
    fn test_ids_parameter() {
        let ids = ids_parameter();
        assert!(ids.required);
        assert_eq!(ids.schema.schema_type, Some(SchemaType::Array));
    }

    #[test]
    fn test_standard_responses() {
        let responses = standard_responses();
        assert_eq!(responses.keys().collect::<Vec<_>>(), vec!["200", "201", "401", "422"]);
        assert_eq!(
            standard_responses_without("201").keys().collect::<Vec<_>>(),
            vec!["200", "401", "422"]
        );
    }

    #[test]
    fn test_map_registers_everything() {
        let resource = posts();
        let router = TemplateRouter::new("http://localhost:8000");
        let mapper = ResourceMapper::new(&resource, &router);
        assert_eq!(mapper.component(), "BlogPost");
        assert_eq!(mapper.alias(), "blogPosts");

        let mut builder = DocumentBuilder::new(Info::new("Admin"));
        assert_eq!(mapper.map(&mut builder).unwrap(), 6);

        let spec = builder.snapshot();
        assert!(spec.tags.contains_key("blogPosts"));
        assert_eq!(
            spec.components.schemas.keys().collect::<Vec<_>>(),
            vec!["BlogPost", "BlogPostCollection"]
        );

        let collection = &spec.paths["/resource/blog-posts/crud"];
        assert_eq!(
            collection.keys().copied().collect::<Vec<_>>(),
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete]
        );
        assert_eq!(collection[&HttpMethod::Delete].operation_id, "blogPostsMassDelete");

        let item = &spec.paths["/resource/blog-posts/crud/{resourceItem}"];
        assert_eq!(
            item.keys().copied().collect::<Vec<_>>(),
            vec![HttpMethod::Put, HttpMethod::Get, HttpMethod::Delete]
        );
        assert_eq!(item[&HttpMethod::Get].summary.as_deref(), Some("Posts - Show"));
    }

    #[test]
    fn test_create_and_update_bodies() {
        let resource = posts();
        let router = TemplateRouter::new("http://localhost:8000");
        let mut builder = DocumentBuilder::default();
        ResourceMapper::new(&resource, &router).map(&mut builder).unwrap();
        let spec = builder.snapshot();

        let create = &spec.paths["/resource/blog-posts/crud"][&HttpMethod::Post];
        let create_body = create.request_body.as_ref().unwrap().json_schema().unwrap();
        assert_eq!(
            create_body.properties.keys().collect::<Vec<_>>(),
            vec!["title", "secret"]
        );
        assert_eq!(create.responses.keys().collect::<Vec<_>>(), vec!["201", "401", "422"]);

        let update = &spec.paths["/resource/blog-posts/crud/{resourceItem}"][&HttpMethod::Put];
        let update_body = update.request_body.as_ref().unwrap().json_schema().unwrap();
        assert_eq!(
            update_body.properties.keys().collect::<Vec<_>>(),
            vec!["id", "title", "secret"]
        );
        assert_eq!(update_body.properties["title"].default, Some(json!("Untitled")));
        assert_eq!(update.responses.keys().collect::<Vec<_>>(), vec!["200", "401", "422"]);
    }

    #[test]
    fn test_custom_key_name_excluded_from_create() {
        let resource = ResourceDefinition::new("Users", "users", "User")
            .with_key_name("uuid")
            .form_field(Field::new("uuid"))
            .form_field(Field::new("id"));
        let router = TemplateRouter::new("http://localhost:8000");
        let mut builder = DocumentBuilder::default();
        ResourceMapper::new(&resource, &router).map(&mut builder).unwrap();

        let spec = builder.snapshot();
        let create = &spec.paths["/resource/users/crud"][&HttpMethod::Post];
        let body = create.request_body.as_ref().unwrap().json_schema().unwrap();
        assert_eq!(body.properties.keys().collect::<Vec<_>>(), vec!["id"]);
    }
}
