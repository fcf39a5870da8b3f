//! Service trait for data providers

use crate::core::error::ProviderResult;
use crate::core::fetch::FetchType;
use crate::core::params::Params;
use crate::core::response::ProviderResponse;
use async_trait::async_trait;

/// A data provider answers the admin front-end's fetch requests
///
/// This is the single integration point a host calls: the generic GraphQL
/// provider and the Prisma dispatch layer both implement it, so either can
/// be wrapped, replaced or mocked.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Perform `fetch_type` on `resource` with the given params
    async fn call(
        &self,
        fetch_type: FetchType,
        resource: &str,
        params: Params,
    ) -> ProviderResult<ProviderResponse>;
}
