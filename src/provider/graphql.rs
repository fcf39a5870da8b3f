//! Schema-driven GraphQL data provider

use crate::client::GraphQLClient;
use crate::core::error::ProviderResult;
use crate::core::fetch::FetchType;
use crate::core::params::Params;
use crate::core::response::ProviderResponse;
use crate::core::service::DataProvider;
use crate::query::QueryBuilder;
use async_trait::async_trait;
use std::sync::Arc;

/// Answers every fetch type with one GraphQL operation
///
/// Queries are built from the introspected schema, sent through the client
/// and parsed back. Fetch types without a matching operation fail with
/// `UNSUPPORTED_FETCH_TYPE`.
pub struct GraphQLDataProvider {
    client: Arc<dyn GraphQLClient>,
    builder: Arc<dyn QueryBuilder>,
}

impl GraphQLDataProvider {
    pub fn new(client: Arc<dyn GraphQLClient>, builder: Arc<dyn QueryBuilder>) -> Self {
        Self { client, builder }
    }
}

#[async_trait]
impl DataProvider for GraphQLDataProvider {
    async fn call(
        &self,
        fetch_type: FetchType,
        resource: &str,
        params: Params,
    ) -> ProviderResult<ProviderResponse> {
        let query = self.builder.build(fetch_type, resource, &params)?;

        tracing::debug!(
            fetch_type = %fetch_type,
            resource = resource,
            operation = %query.operation_name,
            "Executing GraphQL operation"
        );

        let data = self.client.execute(query.to_request()).await?.into_data()?;
        query.parse_response(data)
    }
}
