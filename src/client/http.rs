//! GraphQL over HTTP client built on reqwest

use super::{GraphQLClient, GraphQLRequest, GraphQLResponse};
use crate::core::error::{ClientError, ConfigError, ProviderResult};
use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Options used to build an [`HttpClient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClientOptions {
    /// GraphQL endpoint (e.g. `http://localhost:4466`)
    #[validate(url)]
    pub uri: String,

    /// Headers sent with every request (e.g. `Authorization`)
    #[serde(default)]
    pub headers: IndexMap<String, String>,

    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientOptions {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            headers: IndexMap::new(),
            timeout_secs: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    fn header_map(&self) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidValue {
                    field: format!("headers.{}", name),
                    message: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidValue {
                    field: format!("headers.{}", name),
                    message: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }
}

/// Posts GraphQL requests as JSON to a single endpoint
#[derive(Debug, Clone)]
pub struct HttpClient {
    uri: String,
    http: reqwest::Client,
}

impl HttpClient {
    /// Build a client from validated options
    pub fn new(options: &ClientOptions) -> ProviderResult<Self> {
        options.validate()?;

        let mut builder = reqwest::Client::builder().default_headers(options.header_map()?);
        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            uri: options.uri.clone(),
            http: builder.build()?,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

#[async_trait]
impl GraphQLClient for HttpClient {
    async fn execute(&self, request: GraphQLRequest) -> ProviderResult<GraphQLResponse> {
        tracing::debug!(
            uri = %self.uri,
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            "Sending GraphQL request"
        );

        let response = self.http.post(&self.uri).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // GraphQL servers may answer errors with a non-2xx status and a regular body
        match serde_json::from_str::<GraphQLResponse>(&body) {
            Ok(graphql_response) => Ok(graphql_response),
            Err(_) if !status.is_success() => Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body,
            }
            .into()),
            Err(err) => Err(ClientError::InvalidBody {
                message: err.to_string(),
            }
            .into()),
        }
    }
}
