//! Data providers and the factory that assembles them
//!
//! ```ignore
//! use prisma_provider::prelude::*;
//!
//! let provider = build_data_provider(
//!     ProviderOptions::with_client_options(ClientOptions::new("http://localhost:4466"))
//!         .debug(true),
//! )
//! .await?;
//!
//! let users = provider
//!     .call(FetchType::GetList, "User", Params::GetList(GetListParams::default()))
//!     .await?;
//! ```

pub mod graphql;
pub mod options;
pub mod prisma;

pub use graphql::GraphQLDataProvider;
pub use options::ProviderOptions;
pub use prisma::PrismaDataProvider;

use crate::client::{GraphQLClient, HttpClient};
use crate::core::error::{ConfigError, ProviderResult};
use crate::introspection::{OperationNames, resolve_introspection};
use crate::query::PrismaQueryBuilder;
use std::sync::Arc;

/// Build a data provider for a Prisma GraphQL API
///
/// Introspects the endpoint (unless a schema is supplied), discovers the
/// resources using the Prisma operation names merged with any overrides,
/// and wraps the result in the Prisma dispatch layer.
pub async fn build_data_provider(options: ProviderOptions) -> ProviderResult<PrismaDataProvider> {
    let client: Arc<dyn GraphQLClient> = match (options.client, &options.client_options) {
        (Some(client), _) => client,
        (None, Some(client_options)) => Arc::new(HttpClient::new(client_options)?),
        (None, None) => return Err(ConfigError::MissingClient.into()),
    };

    let names = OperationNames::prisma().merge(&options.introspection.operation_names);
    let introspection =
        resolve_introspection(client.as_ref(), &names, &options.introspection).await?;

    let builder = PrismaQueryBuilder::new(Arc::new(introspection));
    let inner = GraphQLDataProvider::new(client, Arc::new(builder));

    Ok(PrismaDataProvider::new(Arc::new(inner), options.debug))
}
