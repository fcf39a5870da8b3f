//! Introspection schema types
//!
//! Mirrors the shape of the standard `__schema` introspection response so it
//! can be deserialized straight from the server's answer.

use crate::core::error::{IntrospectionError, ProviderResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Standard introspection query
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types { ...FullType }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args { ...InputValue }
    type { ...TypeRef }
    isDeprecated
    deprecationReason
  }
  inputFields { ...InputValue }
  interfaces { ...TypeRef }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes { ...TypeRef }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// Reference to a type, possibly wrapped in LIST / NON_NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// Innermost named type, with every wrapper removed
    pub fn named(&self) -> &TypeRef {
        match (&self.kind, &self.of_type) {
            (TypeKind::List | TypeKind::NonNull, Some(inner)) => inner.named(),
            _ => self,
        }
    }

    /// Name of the innermost type
    pub fn named_type(&self) -> Option<&str> {
        self.named().name.as_deref()
    }

    /// Whether a LIST wrapper appears anywhere in the chain
    pub fn is_list(&self) -> bool {
        match (&self.kind, &self.of_type) {
            (TypeKind::List, _) => true,
            (TypeKind::NonNull, Some(inner)) => inner.is_list(),
            _ => false,
        }
    }

    pub fn is_non_null(&self) -> bool {
        self.kind == TypeKind::NonNull
    }
}

/// Prints the type as it is written in a variable definition (`[ID!]!`)
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.of_type) {
            (TypeKind::NonNull, Some(inner)) => write!(f, "{}!", inner),
            (TypeKind::List, Some(inner)) => write!(f, "[{}]", inner),
            _ => f.write_str(self.name.as_deref().unwrap_or_default()),
        }
    }
}

/// Argument or input-object field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// Field of an object type (or of the query / mutation root)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl Field {
    pub fn arg(&self, name: &str) -> Option<&InputValue> {
        self.args.iter().find(|arg| arg.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
}

/// A type definition from the schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputValue>>,
    #[serde(default)]
    pub enum_values: Option<Vec<EnumValue>>,
}

impl FullType {
    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|field| field.name == name)
    }

    pub fn input_fields(&self) -> &[InputValue] {
        self.input_fields.as_deref().unwrap_or_default()
    }

    pub fn input_field(&self, name: &str) -> Option<&InputValue> {
        self.input_fields().iter().find(|field| field.name == name)
    }

    pub fn has_input_field(&self, name: &str) -> bool {
        self.input_field(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootType {
    pub name: String,
}

/// The `__schema` object of an introspection response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: RootType,
    #[serde(default)]
    pub mutation_type: Option<RootType>,
    pub types: Vec<FullType>,
}

impl IntrospectionSchema {
    /// Read the schema out of an introspection response's `data`
    pub fn from_response_data(data: Value) -> ProviderResult<Self> {
        let schema = match data {
            Value::Object(mut map) => map.remove("__schema"),
            _ => None,
        }
        .ok_or(IntrospectionError::MissingSchema)?;

        Ok(serde_json::from_value(schema)?)
    }

    pub fn type_by_name(&self, name: &str) -> Option<&FullType> {
        self.types.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn non_null_list_of_ids() -> TypeRef {
        serde_json::from_value(json!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": {
                    "kind": "NON_NULL",
                    "name": null,
                    "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_type_ref_display() {
        assert_eq!(non_null_list_of_ids().to_string(), "[ID!]!");
    }

    #[test]
    fn test_type_ref_unwrapping() {
        let type_ref = non_null_list_of_ids();
        assert_eq!(type_ref.named_type(), Some("ID"));
        assert_eq!(type_ref.named().kind, TypeKind::Scalar);
        assert!(type_ref.is_list());
        assert!(type_ref.is_non_null());
    }

    #[test]
    fn test_schema_from_response_data() {
        let data = json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "types": [
                    { "kind": "OBJECT", "name": "Query", "fields": [], "inputFields": null }
                ]
            }
        });
        let schema = IntrospectionSchema::from_response_data(data).unwrap();
        assert_eq!(schema.query_type.name, "Query");
        assert!(schema.mutation_type.is_none());
        assert!(schema.type_by_name("Query").is_some());
    }

    #[test]
    fn test_schema_missing() {
        assert!(IntrospectionSchema::from_response_data(json!({})).is_err());
    }
}
