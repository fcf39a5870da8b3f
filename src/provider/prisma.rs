//! Dispatch layer for Prisma backends
//!
//! Prisma 1 has no native bulk update or bulk delete mutation, so
//! `UPDATE_MANY` and `DELETE_MANY` are served by issuing one `UPDATE` or
//! `DELETE` per identifier concurrently. Everything else goes straight to
//! the wrapped provider.

use crate::core::error::{GraphQLError, ParamsError, ProviderResult};
use crate::core::fetch::FetchType;
use crate::core::params::{DeleteParams, Identifier, Params, UpdateParams};
use crate::core::response::ProviderResponse;
use crate::core::service::DataProvider;
use async_trait::async_trait;
use futures::future::join_all;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Data provider for a Prisma GraphQL API
#[derive(Clone)]
pub struct PrismaDataProvider {
    inner: Arc<dyn DataProvider>,
    debug: bool,
}

impl PrismaDataProvider {
    /// Wrap `inner`; with `debug` set, forwarded results are logged
    pub fn new(inner: Arc<dyn DataProvider>, debug: bool) -> Self {
        Self { inner, debug }
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Run one single-record call per id and collect the returned ids
    ///
    /// Ids come back in input order. The first failure (in input order)
    /// fails the whole call, and so does a response without a record id.
    async fn fan_out(
        &self,
        fetch_type: FetchType,
        resource: &str,
        calls: Vec<Params>,
    ) -> ProviderResult<ProviderResponse> {
        let results = join_all(
            calls
                .into_iter()
                .map(|params| self.inner.call(fetch_type, resource, params)),
        )
        .await;

        let ids = results
            .into_iter()
            .map(|result| {
                let response = result?;
                match response.record_id() {
                    Some(id) if !id.is_null() => Ok(id.clone()),
                    _ => Err(GraphQLError::MissingData {
                        field: "data.id".to_string(),
                    }
                    .into()),
                }
            })
            .collect::<ProviderResult<Vec<Value>>>()?;

        Ok(ProviderResponse::new(Value::Array(ids)))
    }
}

impl fmt::Debug for PrismaDataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrismaDataProvider")
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

fn update_calls(ids: Vec<Identifier>, data: &Map<String, Value>) -> Vec<Params> {
    ids.into_iter()
        .map(|id| {
            Params::Update(UpdateParams {
                id,
                data: data.clone(),
                previous_data: None,
            })
        })
        .collect()
}

fn delete_calls(ids: Vec<Identifier>) -> Vec<Params> {
    ids.into_iter()
        .map(|id| {
            Params::Delete(DeleteParams {
                id,
                previous_data: None,
            })
        })
        .collect()
}

#[async_trait]
impl DataProvider for PrismaDataProvider {
    async fn call(
        &self,
        fetch_type: FetchType,
        resource: &str,
        params: Params,
    ) -> ProviderResult<ProviderResponse> {
        params.ensure_fetch_type(fetch_type)?;

        if !fetch_type.is_bulk() {
            let response = self.inner.call(fetch_type, resource, params).await?;
            if self.debug {
                tracing::debug!(
                    fetch_type = %fetch_type,
                    resource = resource,
                    response = ?response,
                    "Data provider response"
                );
            }
            return Ok(response);
        }

        match params {
            Params::UpdateMany(bulk) => {
                self.fan_out(FetchType::Update, resource, update_calls(bulk.ids, &bulk.data))
                    .await
            }
            Params::DeleteMany(bulk) => {
                self.fan_out(FetchType::Delete, resource, delete_calls(bulk.ids))
                    .await
            }
            other => Err(ParamsError::FetchTypeMismatch {
                expected: fetch_type,
                actual: other.fetch_type(),
            }
            .into()),
        }
    }
}
