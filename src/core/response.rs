//! Provider responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a provider call
///
/// `total` is only set for list-shaped fetch types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl ProviderResponse {
    /// Response for a single record (or a list without total)
    pub fn new(data: Value) -> Self {
        Self { data, total: None }
    }

    /// Response for a page of records
    pub fn with_total(data: Value, total: u64) -> Self {
        Self {
            data,
            total: Some(total),
        }
    }

    /// Identifier of the record carried in `data`, if any
    pub fn record_id(&self) -> Option<&Value> {
        self.data.get("id")
    }
}
