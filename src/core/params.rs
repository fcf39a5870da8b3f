//! Parameters carried by each fetch type
//!
//! Field names follow the admin front-end's JSON conventions (`perPage`,
//! `previousData`), so params posted by a browser deserialize directly.

use crate::core::error::{ParamsError, ProviderResult};
use crate::core::fetch::FetchType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier
pub type Identifier = String;

/// Page selection for list queries (pages start at 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Number of records to skip before the page starts
    pub fn skip(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.per_page)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Sort field and direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetListParams {
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub sort: Option<Sort>,
    #[serde(default)]
    pub filter: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOneParams {
    pub id: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetManyParams {
    pub ids: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetManyReferenceParams {
    /// Field of the resource pointing at the referenced record (e.g. `author`)
    pub target: String,
    pub id: Identifier,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub sort: Option<Sort>,
    #[serde(default)]
    pub filter: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateParams {
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParams {
    pub id: Identifier,
    pub data: Map<String, Value>,
    #[serde(default)]
    pub previous_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateManyParams {
    pub ids: Vec<Identifier>,
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub id: Identifier,
    #[serde(default)]
    pub previous_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteManyParams {
    pub ids: Vec<Identifier>,
}

/// Params of a single provider call, one variant per fetch type
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    GetList(GetListParams),
    GetOne(GetOneParams),
    GetMany(GetManyParams),
    GetManyReference(GetManyReferenceParams),
    Create(CreateParams),
    Update(UpdateParams),
    UpdateMany(UpdateManyParams),
    Delete(DeleteParams),
    DeleteMany(DeleteManyParams),
}

impl Params {
    /// Fetch type this params variant belongs to
    pub fn fetch_type(&self) -> FetchType {
        match self {
            Params::GetList(_) => FetchType::GetList,
            Params::GetOne(_) => FetchType::GetOne,
            Params::GetMany(_) => FetchType::GetMany,
            Params::GetManyReference(_) => FetchType::GetManyReference,
            Params::Create(_) => FetchType::Create,
            Params::Update(_) => FetchType::Update,
            Params::UpdateMany(_) => FetchType::UpdateMany,
            Params::Delete(_) => FetchType::Delete,
            Params::DeleteMany(_) => FetchType::DeleteMany,
        }
    }

    /// Read untyped JSON params for the given fetch type
    pub fn from_value(fetch_type: FetchType, value: Value) -> ProviderResult<Self> {
        let invalid = |err: serde_json::Error| ParamsError::Invalid {
            fetch_type,
            message: err.to_string(),
        };

        let params = match fetch_type {
            FetchType::GetList => Params::GetList(serde_json::from_value(value).map_err(invalid)?),
            FetchType::GetOne => Params::GetOne(serde_json::from_value(value).map_err(invalid)?),
            FetchType::GetMany => Params::GetMany(serde_json::from_value(value).map_err(invalid)?),
            FetchType::GetManyReference => {
                Params::GetManyReference(serde_json::from_value(value).map_err(invalid)?)
            }
            FetchType::Create => Params::Create(serde_json::from_value(value).map_err(invalid)?),
            FetchType::Update => Params::Update(serde_json::from_value(value).map_err(invalid)?),
            FetchType::UpdateMany => {
                Params::UpdateMany(serde_json::from_value(value).map_err(invalid)?)
            }
            FetchType::Delete => Params::Delete(serde_json::from_value(value).map_err(invalid)?),
            FetchType::DeleteMany => {
                Params::DeleteMany(serde_json::from_value(value).map_err(invalid)?)
            }
        };

        Ok(params)
    }

    /// Fail unless these params belong to `fetch_type`
    pub fn ensure_fetch_type(&self, fetch_type: FetchType) -> ProviderResult<()> {
        let actual = self.fetch_type();
        if actual != fetch_type {
            return Err(ParamsError::FetchTypeMismatch {
                expected: fetch_type,
                actual,
            }
            .into());
        }
        Ok(())
    }
}
