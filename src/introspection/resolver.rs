//! Resource discovery from an introspected schema

use super::operation_names::OperationNames;
use super::schema::{Field, FullType, INTROSPECTION_QUERY, IntrospectionSchema, TypeKind};
use crate::client::{GraphQLClient, GraphQLRequest};
use crate::core::error::{IntrospectionError, ProviderResult};
use crate::core::fetch::FetchType;
use crate::core::resource::Resource;
use indexmap::IndexMap;
use serde_json::json;

/// Options controlling introspection and resource discovery
#[derive(Debug, Clone, Default)]
pub struct IntrospectionOptions {
    /// Naming overrides, merged over the Prisma defaults
    pub operation_names: OperationNames,

    /// Only keep these resources
    pub include: Option<Vec<String>>,

    /// Drop these resources
    pub exclude: Option<Vec<String>>,

    /// Use this schema instead of querying the server
    pub schema: Option<IntrospectionSchema>,
}

impl IntrospectionOptions {
    fn check_filters(&self) -> ProviderResult<()> {
        if self.include.is_some() && self.exclude.is_some() {
            return Err(IntrospectionError::ConflictingFilters.into());
        }
        Ok(())
    }

    fn keeps(&self, type_name: &str) -> bool {
        if let Some(include) = &self.include {
            return include.iter().any(|name| name == type_name);
        }
        if let Some(exclude) = &self.exclude {
            return !exclude.iter().any(|name| name == type_name);
        }
        true
    }
}

/// A schema type exposed as a resource, with its operation per fetch type
#[derive(Debug, Clone)]
pub struct IntrospectedResource {
    pub type_def: FullType,
    pub operations: IndexMap<FetchType, Field>,
}

impl IntrospectedResource {
    pub fn name(&self) -> &str {
        &self.type_def.name
    }

    pub fn operation(&self, fetch_type: FetchType) -> Option<&Field> {
        self.operations.get(&fetch_type)
    }
}

/// Everything the query builder needs to know about the schema
#[derive(Debug, Clone)]
pub struct IntrospectionResult {
    /// Schema types, without the `__` meta types
    pub types: Vec<FullType>,

    /// Fields of the query and mutation roots
    pub queries: Vec<Field>,

    pub resources: Vec<IntrospectedResource>,
}

impl IntrospectionResult {
    /// Discover resources in `schema`
    ///
    /// A type is a resource when the schema has a query named after its
    /// `GET_LIST` operation name.
    pub fn resolve(
        schema: IntrospectionSchema,
        names: &OperationNames,
        options: &IntrospectionOptions,
    ) -> ProviderResult<Self> {
        options.check_filters()?;

        let query_type = schema
            .type_by_name(&schema.query_type.name)
            .ok_or_else(|| IntrospectionError::MissingQueryType {
                name: schema.query_type.name.clone(),
            })?;

        let mut queries = query_type.fields().to_vec();
        if let Some(mutation_type) = schema
            .mutation_type
            .as_ref()
            .and_then(|root| schema.type_by_name(&root.name))
        {
            queries.extend(mutation_type.fields().iter().cloned());
        }

        let root_names: Vec<&str> = std::iter::once(schema.query_type.name.as_str())
            .chain(schema.mutation_type.as_ref().map(|root| root.name.as_str()))
            .collect();

        let find_query = |fetch_type: FetchType, resource: &Resource| -> Option<Field> {
            let name = names.resolve(fetch_type, resource)?;
            queries.iter().find(|query| query.name == name).cloned()
        };

        let resources: Vec<IntrospectedResource> = schema
            .types
            .iter()
            .filter(|t| t.kind == TypeKind::Object && !t.name.starts_with("__"))
            .filter(|t| !root_names.contains(&t.name.as_str()))
            .filter(|t| find_query(FetchType::GetList, &Resource::new(&t.name)).is_some())
            .filter(|t| options.keeps(&t.name))
            .map(|t| {
                let resource = Resource::new(&t.name);
                let operations = names
                    .fetch_types()
                    .filter_map(|fetch_type| {
                        find_query(fetch_type, &resource).map(|query| (fetch_type, query))
                    })
                    .collect();
                IntrospectedResource {
                    type_def: t.clone(),
                    operations,
                }
            })
            .collect();

        let types = schema
            .types
            .into_iter()
            .filter(|t| !t.name.starts_with("__"))
            .collect();

        Ok(Self {
            types,
            queries,
            resources,
        })
    }

    pub fn resource(&self, name: &str) -> Option<&IntrospectedResource> {
        self.resources.iter().find(|r| r.name() == name)
    }

    pub fn resource_names(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.name().to_string()).collect()
    }

    pub fn is_resource(&self, type_name: &str) -> bool {
        self.resource(type_name).is_some()
    }

    pub fn type_by_name(&self, name: &str) -> Option<&FullType> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn query(&self, name: &str) -> Option<&Field> {
        self.queries.iter().find(|q| q.name == name)
    }
}

/// Run the introspection query through `client`
pub async fn introspect_schema(client: &dyn GraphQLClient) -> ProviderResult<IntrospectionSchema> {
    let request = GraphQLRequest::new(INTROSPECTION_QUERY, json!({}))
        .with_operation_name("IntrospectionQuery");
    let data = client.execute(request).await?.into_data()?;
    IntrospectionSchema::from_response_data(data)
}

/// Introspect (or take the supplied schema) and discover resources
pub async fn resolve_introspection(
    client: &dyn GraphQLClient,
    names: &OperationNames,
    options: &IntrospectionOptions,
) -> ProviderResult<IntrospectionResult> {
    let schema = match &options.schema {
        Some(schema) => schema.clone(),
        None => introspect_schema(client).await?,
    };

    let result = IntrospectionResult::resolve(schema, names, options)?;
    tracing::info!(
        resources = ?result.resource_names(),
        "Introspection discovered {} resources",
        result.resources.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ProviderError;

    fn fixture_schema() -> IntrospectionSchema {
        serde_json::from_str(include_str!("../../tests/fixtures/schema.json")).unwrap()
    }

    fn resolve(options: IntrospectionOptions) -> ProviderResult<IntrospectionResult> {
        IntrospectionResult::resolve(fixture_schema(), &OperationNames::prisma(), &options)
    }

    #[test]
    fn test_discovers_resources_with_list_query() {
        let result = resolve(IntrospectionOptions::default()).unwrap();

        // Location has no `locations` query, so it is not a resource
        assert_eq!(result.resource_names(), vec!["User", "Post"]);
        assert!(!result.is_resource("Location"));
        assert!(result.type_by_name("Location").is_some());
    }

    #[test]
    fn test_resource_operations() {
        let result = resolve(IntrospectionOptions::default()).unwrap();
        let user = result.resource("User").unwrap();

        assert_eq!(user.operation(FetchType::GetList).unwrap().name, "users");
        assert_eq!(user.operation(FetchType::GetOne).unwrap().name, "user");
        assert_eq!(user.operation(FetchType::Create).unwrap().name, "createUser");
        assert_eq!(user.operation(FetchType::Delete).unwrap().name, "deleteUser");
        assert!(user.operation(FetchType::DeleteMany).is_none());
    }

    #[test]
    fn test_meta_types_are_dropped() {
        let result = resolve(IntrospectionOptions::default()).unwrap();
        assert!(result.types.iter().all(|t| !t.name.starts_with("__")));
        assert!(result.query("usersConnection").is_some());
        assert!(result.query("updatePost").is_some());
    }

    #[test]
    fn test_include_filter() {
        let result = resolve(IntrospectionOptions {
            include: Some(vec!["Post".to_string()]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(result.resource_names(), vec!["Post"]);
    }

    #[test]
    fn test_exclude_filter() {
        let result = resolve(IntrospectionOptions {
            exclude: Some(vec!["Post".to_string()]),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(result.resource_names(), vec!["User"]);
    }

    #[test]
    fn test_include_and_exclude_conflict() {
        let err = resolve(IntrospectionOptions {
            include: Some(vec!["User".to_string()]),
            exclude: Some(vec!["Post".to_string()]),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Introspection(IntrospectionError::ConflictingFilters)
        ));
    }

    #[test]
    fn test_custom_list_names_change_discovery() {
        let names = OperationNames::prisma()
            .merge(&OperationNames::default().with(FetchType::GetList, |r: &Resource| {
                format!("all{}s", r.name)
            }));
        let result =
            IntrospectionResult::resolve(fixture_schema(), &names, &IntrospectionOptions::default())
                .unwrap();
        assert!(result.resources.is_empty());
    }
}
