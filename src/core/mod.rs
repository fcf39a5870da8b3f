//! Core module containing the fetch vocabulary shared by every provider

pub mod case;
pub mod error;
pub mod fetch;
pub mod params;
pub mod pluralize;
pub mod resource;
pub mod response;
pub mod service;

pub use error::{ProviderError, ProviderResult};
pub use fetch::FetchType;
pub use params::{Identifier, Pagination, Params, Sort, SortOrder};
pub use pluralize::Pluralizer;
pub use resource::Resource;
pub use response::ProviderResponse;
pub use service::DataProvider;
