//! Response parsing

use crate::core::error::{GraphQLError, ProviderResult};
use crate::core::response::ProviderResponse;
use serde_json::{Map, Value};

/// How the `data` of a response is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `items` plus an optional `total { aggregate { count } }`
    List { has_total: bool },
    /// A single record under `data`
    Single,
}

/// Turn response `data` into a provider response
pub fn parse_response(shape: ResponseShape, data: Value) -> ProviderResult<ProviderResponse> {
    let Value::Object(mut data) = data else {
        return Err(GraphQLError::MissingData {
            field: "data".to_string(),
        }
        .into());
    };

    match shape {
        ResponseShape::List { has_total } => {
            let items = match data.remove("items") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(GraphQLError::MissingData {
                        field: "items".to_string(),
                    }
                    .into());
                }
            };

            let count = has_total
                .then(|| data.get("total"))
                .flatten()
                .and_then(|total| total.pointer("/aggregate/count"))
                .and_then(Value::as_u64);
            let total = count.unwrap_or(items.len() as u64);

            let items = items.into_iter().map(sanitize_record).collect();
            Ok(ProviderResponse::with_total(Value::Array(items), total))
        }
        ResponseShape::Single => {
            let record = data.remove("data").unwrap_or(Value::Null);
            Ok(ProviderResponse::new(sanitize_record(record)))
        }
    }
}

/// Strip `__typename` and expose related ids
///
/// A related record `author: { id }` adds `authorId`, a list of related
/// records `posts: [{ id }]` adds `postsIds`. Existing keys are kept.
pub fn sanitize_record(value: Value) -> Value {
    let Value::Object(record) = value else {
        return value;
    };

    let mut output = Map::new();
    let mut related_ids = Vec::new();

    for (key, value) in record {
        if key == "__typename" {
            continue;
        }

        match &value {
            Value::Object(related) => {
                if let Some(id) = related.get("id") {
                    related_ids.push((format!("{}Id", key), id.clone()));
                }
            }
            Value::Array(items) if !items.is_empty() => {
                let ids: Option<Vec<Value>> = items
                    .iter()
                    .map(|item| item.as_object().and_then(|o| o.get("id")).cloned())
                    .collect();
                if let Some(ids) = ids {
                    related_ids.push((format!("{}Ids", key), Value::Array(ids)));
                }
            }
            _ => {}
        }

        output.insert(key, sanitize_record(value));
    }

    for (key, id) in related_ids {
        output.entry(key).or_insert(id);
    }

    Value::Object(output)
}
