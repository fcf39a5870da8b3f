//! Typed error handling for the Prisma data provider
//!
//! Failures coming from the GraphQL client or the underlying provider are
//! propagated unchanged through the dispatch layer; this module only
//! classifies them so hosts can match on the category they care about.
//!
//! # Error Categories
//!
//! - [`ResourceError`]: Unknown resource or fetch type without a matching operation
//! - [`ParamsError`]: Parameters that do not fit the requested fetch type
//! - [`ClientError`]: Transport failures talking to the GraphQL endpoint
//! - [`GraphQLError`]: Errors reported by the GraphQL server, or missing data
//! - [`IntrospectionError`]: Schema introspection failures
//! - [`ConfigError`]: Errors related to configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! use prisma_provider::prelude::*;
//!
//! match provider.call(FetchType::GetOne, "Comment", params).await {
//!     Ok(response) => println!("Found: {:?}", response.data),
//!     Err(ProviderError::Resource(ResourceError::UnknownResource { known, .. })) => {
//!         println!("Known resources: {}", known.join(", "));
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::fetch::FetchType;
use serde::Serialize;
use std::fmt;

/// The main error type for the Prisma data provider
#[derive(Debug)]
pub enum ProviderError {
    /// Resource lookup errors
    Resource(ResourceError),

    /// Parameter errors
    Params(ParamsError),

    /// GraphQL transport errors
    Client(ClientError),

    /// GraphQL response errors
    GraphQL(GraphQLError),

    /// Schema introspection errors
    Introspection(IntrospectionError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Resource(e) => write!(f, "{}", e),
            ProviderError::Params(e) => write!(f, "{}", e),
            ProviderError::Client(e) => write!(f, "{}", e),
            ProviderError::GraphQL(e) => write!(f, "{}", e),
            ProviderError::Introspection(e) => write!(f, "{}", e),
            ProviderError::Config(e) => write!(f, "{}", e),
            ProviderError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Resource(e) => Some(e),
            ProviderError::Params(e) => Some(e),
            ProviderError::Client(e) => Some(e),
            ProviderError::GraphQL(e) => Some(e),
            ProviderError::Introspection(e) => Some(e),
            ProviderError::Config(e) => Some(e),
            ProviderError::Internal(_) => None,
        }
    }
}

/// Serializable error summary, suitable for handing back to a front-end
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ProviderError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ProviderError::Resource(e) => e.error_code(),
            ProviderError::Params(_) => "INVALID_PARAMS",
            ProviderError::Client(e) => e.error_code(),
            ProviderError::GraphQL(e) => e.error_code(),
            ProviderError::Introspection(_) => "INTROSPECTION_ERROR",
            ProviderError::Config(_) => "CONFIG_ERROR",
            ProviderError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ProviderError::Resource(ResourceError::UnknownResource { resource, known }) => {
                Some(serde_json::json!({
                    "resource": resource,
                    "known_resources": known
                }))
            }
            ProviderError::Client(ClientError::HttpStatus { status, .. }) => {
                Some(serde_json::json!({ "status": status }))
            }
            ProviderError::GraphQL(GraphQLError::Errors { messages }) => {
                Some(serde_json::json!({ "errors": messages }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Resource Errors
// =============================================================================

/// Errors related to resource lookup
#[derive(Debug)]
pub enum ResourceError {
    /// The resource is not exposed by the introspected schema
    UnknownResource { resource: String, known: Vec<String> },

    /// The resource has no query or mutation for the fetch type
    UnsupportedFetchType {
        resource: String,
        fetch_type: FetchType,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::UnknownResource { resource, known } => {
                write!(
                    f,
                    "Unknown resource {}. Make sure it has been declared on your server side schema. Known resources are {}",
                    resource,
                    known.join(", ")
                )
            }
            ResourceError::UnsupportedFetchType {
                resource,
                fetch_type,
            } => {
                write!(
                    f,
                    "No query or mutation matching fetch type {} could be found for resource {}",
                    fetch_type, resource
                )
            }
        }
    }
}

impl std::error::Error for ResourceError {}

impl ResourceError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ResourceError::UnknownResource { .. } => "UNKNOWN_RESOURCE",
            ResourceError::UnsupportedFetchType { .. } => "UNSUPPORTED_FETCH_TYPE",
        }
    }
}

impl From<ResourceError> for ProviderError {
    fn from(err: ResourceError) -> Self {
        ProviderError::Resource(err)
    }
}

// =============================================================================
// Params Errors
// =============================================================================

/// Errors related to fetch parameters
#[derive(Debug)]
pub enum ParamsError {
    /// Params variant does not belong to the requested fetch type
    FetchTypeMismatch {
        expected: FetchType,
        actual: FetchType,
    },

    /// Params could not be read for the fetch type
    Invalid {
        fetch_type: FetchType,
        message: String,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::FetchTypeMismatch { expected, actual } => {
                write!(
                    f,
                    "Params for {} cannot be used with fetch type {}",
                    actual, expected
                )
            }
            ParamsError::Invalid {
                fetch_type,
                message,
            } => {
                write!(f, "Invalid params for {}: {}", fetch_type, message)
            }
        }
    }
}

impl std::error::Error for ParamsError {}

impl From<ParamsError> for ProviderError {
    fn from(err: ParamsError) -> Self {
        ProviderError::Params(err)
    }
}

// =============================================================================
// Client Errors
// =============================================================================

/// Errors raised while talking to the GraphQL endpoint
#[derive(Debug)]
pub enum ClientError {
    /// Request could not be sent or the connection failed
    Transport { message: String },

    /// Endpoint answered with a non-success status and no GraphQL body
    HttpStatus { status: u16, body: String },

    /// Response body is not a GraphQL response
    InvalidBody { message: String },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport { message } => {
                write!(f, "Failed to send GraphQL request: {}", message)
            }
            ClientError::HttpStatus { status, body } => {
                write!(f, "GraphQL endpoint returned status {}: {}", status, body)
            }
            ClientError::InvalidBody { message } => {
                write!(f, "Failed to read GraphQL response body: {}", message)
            }
        }
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Transport { .. } => "CLIENT_TRANSPORT_ERROR",
            ClientError::HttpStatus { .. } => "CLIENT_HTTP_STATUS",
            ClientError::InvalidBody { .. } => "CLIENT_INVALID_BODY",
        }
    }
}

impl From<ClientError> for ProviderError {
    fn from(err: ClientError) -> Self {
        ProviderError::Client(err)
    }
}

// =============================================================================
// GraphQL Errors
// =============================================================================

/// Errors carried by, or detected in, GraphQL responses
#[derive(Debug)]
pub enum GraphQLError {
    /// The server answered with a non-empty `errors` array
    Errors { messages: Vec<String> },

    /// An expected field is absent from the response data
    MissingData { field: String },
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphQLError::Errors { messages } => {
                write!(f, "GraphQL error: {}", messages.join("; "))
            }
            GraphQLError::MissingData { field } => {
                write!(f, "GraphQL response is missing '{}'", field)
            }
        }
    }
}

impl std::error::Error for GraphQLError {}

impl GraphQLError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GraphQLError::Errors { .. } => "GRAPHQL_ERRORS",
            GraphQLError::MissingData { .. } => "GRAPHQL_MISSING_DATA",
        }
    }
}

impl From<GraphQLError> for ProviderError {
    fn from(err: GraphQLError) -> Self {
        ProviderError::GraphQL(err)
    }
}

// =============================================================================
// Introspection Errors
// =============================================================================

/// Errors related to schema introspection
#[derive(Debug)]
pub enum IntrospectionError {
    /// Introspection response carries no `__schema`
    MissingSchema,

    /// The schema's query type is not among its types
    MissingQueryType { name: String },

    /// Both `include` and `exclude` were supplied
    ConflictingFilters,
}

impl fmt::Display for IntrospectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntrospectionError::MissingSchema => {
                write!(f, "Introspection response does not contain a schema")
            }
            IntrospectionError::MissingQueryType { name } => {
                write!(f, "Query type '{}' is not defined in the schema", name)
            }
            IntrospectionError::ConflictingFilters => {
                write!(f, "Only one of 'include' and 'exclude' can be supplied")
            }
        }
    }
}

impl std::error::Error for IntrospectionError {}

impl From<IntrospectionError> for ProviderError {
    fn from(err: IntrospectionError) -> Self {
        ProviderError::Introspection(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Neither a client nor client options were given
    MissingClient,

    /// Invalid value in configuration
    InvalidValue { field: String, message: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::MissingClient => {
                write!(f, "Either a client or client options must be provided")
            }
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for field '{}': {}", field, message)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for ProviderError {
    fn from(err: ConfigError) -> Self {
        ProviderError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Client(ClientError::InvalidBody {
                message: err.to_string(),
            })
        } else {
            ProviderError::Client(ClientError::Transport {
                message: err.to_string(),
            })
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Client(ClientError::InvalidBody {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ProviderError {
    fn from(err: serde_yaml::Error) -> Self {
        ProviderError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for ProviderError {
    fn from(err: validator::ValidationErrors) -> Self {
        let field = err
            .field_errors()
            .keys()
            .next()
            .map(|field| field.to_string())
            .unwrap_or_default();
        ProviderError::Config(ConfigError::InvalidValue {
            field,
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error for config helpers returning anyhow
impl From<anyhow::Error> for ProviderError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ProviderError>() {
            Ok(provider_err) => provider_err,
            Err(err) => ProviderError::Internal(err.to_string()),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

// =============================================================================
// Tests
// =============================================================================
