//! Selection sets for resource types

use crate::introspection::{Field, FullType, IntrospectionResult, TypeKind};

/// Nesting limit for embedded (non-resource) object types
const MAX_DEPTH: usize = 3;

/// One entry of a selection set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    Leaf(String),
    Nested(String, Vec<FieldSelection>),
}

/// Select every field of `type_def` that can be fetched without arguments
///
/// Scalars and enums are selected by name, related resources only by
/// `id`, embedded object types recursively.
pub fn build_fields(
    introspection: &IntrospectionResult,
    type_def: &FullType,
) -> Vec<FieldSelection> {
    build_fields_at(introspection, type_def, 0)
}

fn build_fields_at(
    introspection: &IntrospectionResult,
    type_def: &FullType,
    depth: usize,
) -> Vec<FieldSelection> {
    type_def
        .fields()
        .iter()
        .filter(|field| !has_required_args(field))
        .filter_map(|field| {
            let named = field.type_ref.named();
            let type_name = named.name.as_deref()?;

            match named.kind {
                TypeKind::Scalar | TypeKind::Enum => Some(FieldSelection::Leaf(field.name.clone())),
                TypeKind::Object if introspection.is_resource(type_name) => {
                    Some(FieldSelection::Nested(
                        field.name.clone(),
                        vec![FieldSelection::Leaf("id".to_string())],
                    ))
                }
                TypeKind::Object if depth < MAX_DEPTH => {
                    let nested_type = introspection.type_by_name(type_name)?;
                    let nested = build_fields_at(introspection, nested_type, depth + 1);
                    (!nested.is_empty()).then(|| FieldSelection::Nested(field.name.clone(), nested))
                }
                _ => None,
            }
        })
        .collect()
}

fn has_required_args(field: &Field) -> bool {
    field
        .args
        .iter()
        .any(|arg| arg.type_ref.is_non_null() && arg.default_value.is_none())
}

/// Render a selection set body, one field per line
pub fn render_fields(fields: &[FieldSelection], indent: usize) -> String {
    let pad = "  ".repeat(indent);
    fields
        .iter()
        .map(|field| match field {
            FieldSelection::Leaf(name) => format!("{}{}", pad, name),
            FieldSelection::Nested(name, children) => format!(
                "{pad}{name} {{\n{}\n{pad}}}",
                render_fields(children, indent + 1),
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
