//! GraphQL document text
//!
//! List queries alias the records as `items` and, when the schema exposes a
//! `<name>Connection` query, the aggregate as `total`. Every other operation
//! aliases its result as `data`.

use super::fields::{build_fields, render_fields};
use crate::core::fetch::FetchType;
use crate::introspection::{Field, IntrospectedResource, IntrospectionResult};
use serde_json::{Map, Value};

/// Document text plus whether it selects a `total`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    pub has_total: bool,
}

/// Build the document for `query`, declaring only the variables present
pub fn build_document(
    introspection: &IntrospectionResult,
    resource: &IntrospectedResource,
    fetch_type: FetchType,
    query: &Field,
    variables: &Map<String, Value>,
) -> Document {
    let provided: Vec<_> = query
        .args
        .iter()
        .filter(|arg| variables.contains_key(&arg.name))
        .collect();

    let declarations = provided
        .iter()
        .map(|arg| format!("${}: {}", arg.name, arg.type_ref))
        .collect::<Vec<_>>()
        .join(", ");
    let arguments = provided
        .iter()
        .map(|arg| format!("{}: ${}", arg.name, arg.name))
        .collect::<Vec<_>>()
        .join(", ");

    let operation = if fetch_type.is_mutation() {
        "mutation"
    } else {
        "query"
    };

    let fields = if fetch_type == FetchType::Delete {
        "    id".to_string()
    } else {
        render_fields(&build_fields(introspection, &resource.type_def), 2)
    };

    let mut body = String::new();
    let mut has_total = false;

    if fetch_type.is_list() {
        body.push_str(&format!(
            "  items: {}{} {{\n{}\n  }}",
            query.name,
            parenthesize(&arguments),
            fields
        ));

        if let Some(connection) = introspection.query(&format!("{}Connection", query.name)) {
            let where_argument = if connection.arg("where").is_some()
                && variables.contains_key("where")
            {
                "(where: $where)"
            } else {
                ""
            };
            body.push_str(&format!(
                "\n  total: {}{} {{\n    aggregate {{\n      count\n    }}\n  }}",
                connection.name, where_argument
            ));
            has_total = true;
        }
    } else {
        body.push_str(&format!(
            "  data: {}{} {{\n{}\n  }}",
            query.name,
            parenthesize(&arguments),
            fields
        ));
    }

    Document {
        text: format!(
            "{} {}{} {{\n{}\n}}",
            operation,
            query.name,
            parenthesize(&declarations),
            body
        ),
        has_total,
    }
}

fn parenthesize(list: &str) -> String {
    if list.is_empty() {
        String::new()
    } else {
        format!("({})", list)
    }
}
