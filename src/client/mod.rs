//! GraphQL client abstraction
//!
//! The provider only needs to send a document with variables and read back
//! `data`/`errors`; hosts that already have a client plug it in through
//! [`GraphQLClient`], otherwise [`HttpClient`] posts to the endpoint itself.

pub mod http;

pub use http::{ClientOptions, HttpClient};

use crate::core::error::{GraphQLError, ProviderResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GraphQL request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Value,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>, variables: Value) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables,
        }
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// A single entry of a GraphQL `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponseError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// GraphQL response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQLResponseError>>,
}

impl GraphQLResponse {
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// Take `data`, failing when the server reported errors or sent none
    pub fn into_data(self) -> ProviderResult<Value> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            tracing::warn!(errors = ?messages, "GraphQL response carried errors");
            return Err(GraphQLError::Errors { messages }.into());
        }

        match self.data {
            Some(Value::Null) | None => Err(GraphQLError::MissingData {
                field: "data".to_string(),
            }
            .into()),
            Some(data) => Ok(data),
        }
    }
}

/// Executes GraphQL documents against a backend
#[async_trait]
pub trait GraphQLClient: Send + Sync {
    /// Send a query or mutation and return the raw response
    async fn execute(&self, request: GraphQLRequest) -> ProviderResult<GraphQLResponse>;
}
