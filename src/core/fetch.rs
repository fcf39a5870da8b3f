//! Abstract fetch types issued by the admin front-end

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of data operations a host can request
///
/// The wire names (`GET_LIST`, `DELETE_MANY`, ...) are the ones admin
/// front-ends use, so they round-trip through JSON and YAML unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FetchType {
    GetList,
    GetOne,
    GetMany,
    GetManyReference,
    Create,
    Update,
    UpdateMany,
    Delete,
    DeleteMany,
}

impl FetchType {
    /// Every fetch type, in declaration order
    pub const ALL: [FetchType; 9] = [
        FetchType::GetList,
        FetchType::GetOne,
        FetchType::GetMany,
        FetchType::GetManyReference,
        FetchType::Create,
        FetchType::Update,
        FetchType::UpdateMany,
        FetchType::Delete,
        FetchType::DeleteMany,
    ];

    /// Wire name of the fetch type
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchType::GetList => "GET_LIST",
            FetchType::GetOne => "GET_ONE",
            FetchType::GetMany => "GET_MANY",
            FetchType::GetManyReference => "GET_MANY_REFERENCE",
            FetchType::Create => "CREATE",
            FetchType::Update => "UPDATE",
            FetchType::UpdateMany => "UPDATE_MANY",
            FetchType::Delete => "DELETE",
            FetchType::DeleteMany => "DELETE_MANY",
        }
    }

    /// Whether the response carries a list of records and a total
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            FetchType::GetList | FetchType::GetMany | FetchType::GetManyReference
        )
    }

    /// Whether the operation is sent as a GraphQL mutation
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            FetchType::Create
                | FetchType::Update
                | FetchType::UpdateMany
                | FetchType::Delete
                | FetchType::DeleteMany
        )
    }

    /// Bulk operations have no native mutation and are fanned out
    pub fn is_bulk(&self) -> bool {
        matches!(self, FetchType::UpdateMany | FetchType::DeleteMany)
    }
}

impl fmt::Display for FetchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FetchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FetchType::ALL
            .into_iter()
            .find(|fetch_type| fetch_type.as_str() == s)
            .ok_or_else(|| format!("Unknown fetch type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for fetch_type in FetchType::ALL {
            assert_eq!(fetch_type.as_str().parse::<FetchType>(), Ok(fetch_type));
        }
        assert!("GET_EVERYTHING".parse::<FetchType>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&FetchType::GetManyReference).unwrap();
        assert_eq!(json, "\"GET_MANY_REFERENCE\"");

        let parsed: FetchType = serde_json::from_str("\"DELETE_MANY\"").unwrap();
        assert_eq!(parsed, FetchType::DeleteMany);
    }

    #[test]
    fn test_classification() {
        assert!(FetchType::GetMany.is_list());
        assert!(!FetchType::GetOne.is_list());
        assert!(FetchType::Delete.is_mutation());
        assert!(!FetchType::GetList.is_mutation());
        assert!(FetchType::UpdateMany.is_bulk());
        assert!(!FetchType::Update.is_bulk());
    }
}
