//! Prisma query building
//!
//! Turns a `(fetch type, resource, params)` triple into a GraphQL document
//! plus variables, and knows how to read the matching response back.

pub mod document;
pub mod fields;
pub mod response;
pub mod variables;

pub use response::ResponseShape;

use crate::client::GraphQLRequest;
use crate::core::error::{ProviderResult, ResourceError};
use crate::core::fetch::FetchType;
use crate::core::params::Params;
use crate::core::response::ProviderResponse;
use crate::introspection::IntrospectionResult;
use serde_json::Value;
use std::sync::Arc;

/// A query ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    /// Name of the query or mutation field (e.g. `users`, `createUser`)
    pub operation_name: String,
    pub document: String,
    pub variables: Value,
    pub shape: ResponseShape,
}

impl BuiltQuery {
    pub fn to_request(&self) -> GraphQLRequest {
        GraphQLRequest::new(self.document.clone(), self.variables.clone())
            .with_operation_name(self.operation_name.clone())
    }

    /// Read the response `data` of this query
    pub fn parse_response(&self, data: Value) -> ProviderResult<ProviderResponse> {
        response::parse_response(self.shape, data)
    }
}

/// Builds queries for a GraphQL dialect
pub trait QueryBuilder: Send + Sync {
    fn build(
        &self,
        fetch_type: FetchType,
        resource: &str,
        params: &Params,
    ) -> ProviderResult<BuiltQuery>;
}

/// Query builder for Prisma-generated schemas
#[derive(Debug, Clone)]
pub struct PrismaQueryBuilder {
    introspection: Arc<IntrospectionResult>,
}

impl PrismaQueryBuilder {
    pub fn new(introspection: Arc<IntrospectionResult>) -> Self {
        Self { introspection }
    }

    pub fn introspection(&self) -> &IntrospectionResult {
        &self.introspection
    }
}

impl QueryBuilder for PrismaQueryBuilder {
    fn build(
        &self,
        fetch_type: FetchType,
        resource_name: &str,
        params: &Params,
    ) -> ProviderResult<BuiltQuery> {
        params.ensure_fetch_type(fetch_type)?;

        let resource = self.introspection.resource(resource_name).ok_or_else(|| {
            ResourceError::UnknownResource {
                resource: resource_name.to_string(),
                known: self.introspection.resource_names(),
            }
        })?;

        let query = resource
            .operation(fetch_type)
            .ok_or_else(|| ResourceError::UnsupportedFetchType {
                resource: resource_name.to_string(),
                fetch_type,
            })?;

        let mut variables = variables::build_variables(&self.introspection, resource, params)?;
        // Only send what the operation accepts
        variables.retain(|name, _| query.arg(name).is_some());

        let document =
            document::build_document(&self.introspection, resource, fetch_type, query, &variables);

        let shape = if fetch_type.is_list() {
            ResponseShape::List {
                has_total: document.has_total,
            }
        } else {
            ResponseShape::Single
        };

        Ok(BuiltQuery {
            operation_name: query.name.clone(),
            document: document.text,
            variables: Value::Object(variables),
            shape,
        })
    }
}
