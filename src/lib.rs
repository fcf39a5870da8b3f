//! # Prisma Data Provider
//!
//! Serves an admin front-end's CRUD fetch types from a Prisma 1 GraphQL API.
//!
//! ## Features
//!
//! - **Schema-Driven**: Resources and their operations are discovered by introspection
//! - **Prisma Naming**: `users`, `user`, `createUser`, ... derived from the type name
//! - **Relation-Aware Mutations**: Record data becomes `connect` / `disconnect` / `set` inputs
//! - **Bulk Fallback**: `UPDATE_MANY` / `DELETE_MANY` fan out into concurrent single calls
//! - **Configuration-Based**: Client, naming overrides and resource filters from YAML
//! - **Pluggable Client**: Bring your own [`GraphQLClient`](client::GraphQLClient)
//!   or use the reqwest one
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prisma_provider::prelude::*;
//!
//! let config = ProviderConfig::from_yaml_file("provider.yaml")?;
//! init_tracing(config.debug);
//!
//! let provider = build_data_provider(config.into_options()).await?;
//!
//! let page = provider
//!     .call(
//!         FetchType::GetList,
//!         "User",
//!         Params::from_value(FetchType::GetList, serde_json::json!({
//!             "pagination": { "page": 1, "perPage": 25 },
//!             "sort": { "field": "name", "order": "ASC" },
//!             "filter": { "role": "ADMIN" }
//!         }))?,
//!     )
//!     .await?;
//!
//! println!("{} users", page.total.unwrap_or_default());
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod introspection;
pub mod logging;
pub mod provider;
pub mod query;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        DataProvider, FetchType, Identifier, Pagination, Params, ProviderResponse, Resource,
        Sort, SortOrder,
        error::{
            ClientError, ConfigError, GraphQLError, IntrospectionError, ParamsError,
            ProviderError, ProviderResult, ResourceError,
        },
        params::{
            CreateParams, DeleteManyParams, DeleteParams, GetListParams, GetManyParams,
            GetManyReferenceParams, GetOneParams, UpdateManyParams, UpdateParams,
        },
        pluralize::Pluralizer,
    };

    // === Client ===
    pub use crate::client::{
        ClientOptions, GraphQLClient, GraphQLRequest, GraphQLResponse, HttpClient,
    };

    // === Introspection & Queries ===
    pub use crate::introspection::{
        IntrospectionOptions, IntrospectionResult, IntrospectionSchema, OperationNames,
    };
    pub use crate::query::{BuiltQuery, PrismaQueryBuilder, QueryBuilder};

    // === Providers ===
    pub use crate::provider::{
        GraphQLDataProvider, PrismaDataProvider, ProviderOptions, build_data_provider,
    };

    // === Config & Logging ===
    pub use crate::config::{IntrospectionConfig, ProviderConfig};
    pub use crate::logging::init_tracing;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
