//! Query variables for each fetch type
//!
//! Filters become Prisma `where` inputs and record data is shaped against
//! the resource's `<Type>CreateInput` / `<Type>UpdateInput` so relations are
//! sent as `connect` / `disconnect` / `set` / `create` operations.

use crate::core::error::{ProviderResult, ResourceError};
use crate::core::params::{Pagination, Params, Sort};
use crate::introspection::{FullType, IntrospectedResource, IntrospectionResult, TypeKind};
use serde_json::{Map, Value, json};

/// Which mutation input the data is shaped for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Create,
    Update,
}

impl DataMode {
    fn input_type_name(&self, resource: &str) -> String {
        match self {
            DataMode::Create => format!("{}CreateInput", resource),
            DataMode::Update => format!("{}UpdateInput", resource),
        }
    }
}

/// Build the variables for `params`
pub fn build_variables(
    introspection: &IntrospectionResult,
    resource: &IntrospectedResource,
    params: &Params,
) -> ProviderResult<Map<String, Value>> {
    let variables = match params {
        Params::GetList(p) => list_variables(
            p.pagination.as_ref(),
            p.sort.as_ref(),
            build_where(introspection, resource, &p.filter),
        ),
        Params::GetOne(p) => where_id(json!({ "id": p.id })),
        Params::GetMany(p) => where_id(json!({ "id_in": p.ids })),
        Params::GetManyReference(p) => {
            let mut filter = build_where(introspection, resource, &p.filter);
            let root = p.target.split('.').next().unwrap_or(&p.target);
            filter.insert(root.to_string(), json!({ "id": p.id }));
            list_variables(p.pagination.as_ref(), p.sort.as_ref(), filter)
        }
        Params::Create(p) => {
            let mut variables = Map::new();
            variables.insert(
                "data".to_string(),
                Value::Object(build_data(introspection, resource, &p.data, None, DataMode::Create)),
            );
            variables
        }
        Params::Update(p) => {
            let mut variables = where_id(json!({ "id": p.id }));
            variables.insert(
                "data".to_string(),
                Value::Object(build_data(
                    introspection,
                    resource,
                    &p.data,
                    p.previous_data.as_ref(),
                    DataMode::Update,
                )),
            );
            variables
        }
        Params::Delete(p) => where_id(json!({ "id": p.id })),
        Params::UpdateMany(_) | Params::DeleteMany(_) => {
            return Err(ResourceError::UnsupportedFetchType {
                resource: resource.name().to_string(),
                fetch_type: params.fetch_type(),
            }
            .into());
        }
    };

    Ok(variables)
}

fn where_id(value: Value) -> Map<String, Value> {
    let mut variables = Map::new();
    variables.insert("where".to_string(), value);
    variables
}

fn list_variables(
    pagination: Option<&Pagination>,
    sort: Option<&Sort>,
    filter: Map<String, Value>,
) -> Map<String, Value> {
    let mut variables = Map::new();
    if let Some(pagination) = pagination {
        variables.insert("skip".to_string(), json!(pagination.skip()));
        variables.insert("first".to_string(), json!(pagination.per_page));
    }
    if let Some(sort) = sort {
        variables.insert(
            "orderBy".to_string(),
            json!(format!("{}_{}", sort.field, sort.order.as_str())),
        );
    }
    variables.insert("where".to_string(), Value::Object(filter));
    variables
}

// ============================================================================
// Filters
// ============================================================================

/// Translate a front-end filter into a Prisma `where` input
///
/// - `ids` becomes `id_in`
/// - `author.id` targets the relation (`author_some` for lists)
/// - other dotted keys nest (`author.name` → `author: { name }`)
/// - arrays match through `_some` / `_in` when the where input has them
/// - scalars are coerced to the field's `Int` / `Float` type
pub fn build_where(
    introspection: &IntrospectionResult,
    resource: &IntrospectedResource,
    filter: &Map<String, Value>,
) -> Map<String, Value> {
    let where_type = introspection.type_by_name(&format!("{}WhereInput", resource.name()));
    let has = |name: &str| where_type.is_some_and(|t| t.has_input_field(name));
    let scalar_type = |key: &str| -> Option<String> {
        where_type
            .and_then(|t| t.input_field(key))
            .and_then(|f| f.type_ref.named_type())
            .or_else(|| {
                resource
                    .type_def
                    .field(key)
                    .and_then(|f| f.type_ref.named_type())
            })
            .map(str::to_string)
    };

    let mut output = Map::new();
    for (key, value) in filter {
        if key == "ids" {
            output.insert("id_in".to_string(), value.clone());
            continue;
        }

        if let Some((root, rest)) = key.split_once('.') {
            if rest == "id" {
                let some = format!("{}_some", root);
                let target = if has(&some) { some } else { root.to_string() };
                output.insert(target, json!({ "id": value }));
            } else {
                let entry = output
                    .entry(root.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(nested) = entry {
                    insert_path(nested, rest, value.clone());
                }
            }
            continue;
        }

        match value {
            Value::Array(items) => {
                let some = format!("{}_some", key);
                let within = format!("{}_in", key);
                if has(&some) {
                    output.insert(some, json!({ "id_in": items }));
                } else if has(&within) {
                    let items = coerce_items(scalar_type(&within).as_deref(), items);
                    output.insert(within, items);
                } else if has(key) {
                    // already a list operator such as `age_in`
                    let items = coerce_items(scalar_type(key).as_deref(), items);
                    output.insert(key.clone(), items);
                } else {
                    output.insert(key.clone(), value.clone());
                }
            }
            Value::Object(_) => {
                let some = format!("{}_some", key);
                let target = if has(&some) { some } else { key.clone() };
                output.insert(target, value.clone());
            }
            scalar => {
                let field_type = scalar_type(key);
                output.insert(key.clone(), coerce_scalar(field_type.as_deref(), scalar));
            }
        }
    }

    output
}

fn coerce_items(type_name: Option<&str>, items: &[Value]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| coerce_scalar(type_name, item))
            .collect(),
    )
}

fn insert_path(map: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(nested) = entry {
                insert_path(nested, rest, value);
            }
        }
        None => {
            map.insert(path.to_string(), value);
        }
    }
}

/// Coerce a JSON scalar to the GraphQL scalar type it is sent as
///
/// Strings are parsed for `Int` and `Float`; values that do not parse are
/// left alone so the server reports the problem.
pub fn coerce_scalar(type_name: Option<&str>, value: &Value) -> Value {
    match (type_name, value) {
        (Some("Int"), Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| value.clone()),
        (Some("Int"), Value::Number(n)) if !n.is_i64() && !n.is_u64() => n
            .as_f64()
            .map(|f| Value::from(f.trunc() as i64))
            .unwrap_or_else(|| value.clone()),
        (Some("Float"), Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(|f| serde_json::Number::from_f64(f).map(Value::Number))
            .unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

// ============================================================================
// Mutation data
// ============================================================================

/// Shape record data for a create or update mutation
///
/// `id` and `__typename` are never sent, neither are fields the input type
/// does not declare. When the schema has no input type for the resource the
/// data is passed through as is.
pub fn build_data(
    introspection: &IntrospectionResult,
    resource: &IntrospectedResource,
    data: &Map<String, Value>,
    previous: Option<&Map<String, Value>>,
    mode: DataMode,
) -> Map<String, Value> {
    let Some(input_type) = introspection.type_by_name(&mode.input_type_name(resource.name())) else {
        return data
            .iter()
            .filter(|(key, _)| *key != "id" && *key != "__typename")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
    };

    let mut output = Map::new();
    for (key, value) in data {
        if key == "id" || key == "__typename" {
            continue;
        }

        if let Some(field) = key.strip_suffix("Ids") {
            if let Some(input) = relation_input(introspection, input_type, field) {
                let previous_ids = previous.and_then(|p| previous_relation_ids(p, field));
                if let Some(relation) = list_relation(input, &ids_of(value), previous_ids, mode) {
                    output.insert(field.to_string(), relation);
                }
                continue;
            }
        }

        if let Some(field) = key.strip_suffix("Id") {
            if let Some(input) = relation_input(introspection, input_type, field) {
                if let Some(relation) = single_relation(input, value, mode) {
                    output.insert(field.to_string(), relation);
                }
                continue;
            }
        }

        let Some(field) = input_type.input_field(key) else {
            continue;
        };
        let type_name = field.type_ref.named_type();
        let nested_input = type_name
            .and_then(|name| introspection.type_by_name(name))
            .filter(|t| t.kind == TypeKind::InputObject);

        match nested_input {
            Some(input) if input.has_input_field("connect") => {
                // The `<field>Ids` / `<field>Id` form wins over the object form
                if data.contains_key(&format!("{}Ids", key))
                    || data.contains_key(&format!("{}Id", key))
                {
                    continue;
                }
                let relation = match value {
                    Value::Array(_) => {
                        let previous_ids = previous.and_then(|p| previous_relation_ids(p, key));
                        list_relation(input, &ids_of(value), previous_ids, mode)
                    }
                    other => single_relation(input, other, mode),
                };
                if let Some(relation) = relation {
                    output.insert(key.clone(), relation);
                }
            }
            Some(input) if input.has_input_field("set") => {
                output.insert(key.clone(), json!({ "set": value }));
            }
            Some(input) if value.is_object() => {
                let operation = if mode == DataMode::Update && input.has_input_field("update") {
                    "update"
                } else {
                    "create"
                };
                if input.has_input_field(operation) {
                    output.insert(key.clone(), json!({ operation: value }));
                } else {
                    output.insert(key.clone(), value.clone());
                }
            }
            _ => {
                output.insert(key.clone(), coerce_scalar(type_name, value));
            }
        }
    }

    output
}

/// Relation input (one with `connect`) behind a field of `input_type`
fn relation_input<'a>(
    introspection: &'a IntrospectionResult,
    input_type: &FullType,
    field: &str,
) -> Option<&'a FullType> {
    let type_name = input_type.input_field(field)?.type_ref.named_type()?;
    introspection
        .type_by_name(type_name)
        .filter(|t| t.kind == TypeKind::InputObject && t.has_input_field("connect"))
}

/// Ids from a list of ids or of `{ id }` objects
fn ids_of(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(record) => record.get("id").cloned(),
                Value::Null => None,
                id => Some(id.clone()),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn previous_relation_ids(previous: &Map<String, Value>, field: &str) -> Option<Vec<Value>> {
    previous
        .get(&format!("{}Ids", field))
        .or_else(|| previous.get(field))
        .filter(|value| value.is_array())
        .map(ids_of)
}

fn connect_all(ids: &[Value]) -> Value {
    Value::Array(ids.iter().map(|id| json!({ "id": id })).collect())
}

fn list_relation(
    input: &FullType,
    ids: &[Value],
    previous: Option<Vec<Value>>,
    mode: DataMode,
) -> Option<Value> {
    match (mode, previous) {
        (DataMode::Create, _) => Some(json!({ "connect": connect_all(ids) })),
        (DataMode::Update, Some(previous)) => {
            let added: Vec<Value> = ids
                .iter()
                .filter(|id| !previous.contains(id))
                .cloned()
                .collect();
            let removed: Vec<Value> = previous
                .iter()
                .filter(|id| !ids.contains(id))
                .cloned()
                .collect();

            let mut relation = Map::new();
            if !added.is_empty() {
                relation.insert("connect".to_string(), connect_all(&added));
            }
            if !removed.is_empty() && input.has_input_field("disconnect") {
                relation.insert("disconnect".to_string(), connect_all(&removed));
            }
            (!relation.is_empty()).then_some(Value::Object(relation))
        }
        (DataMode::Update, None) if input.has_input_field("set") => {
            Some(json!({ "set": connect_all(ids) }))
        }
        (DataMode::Update, None) => Some(json!({ "connect": connect_all(ids) })),
    }
}

fn single_relation(input: &FullType, value: &Value, mode: DataMode) -> Option<Value> {
    match value {
        Value::Null if mode == DataMode::Update && input.has_input_field("disconnect") => {
            Some(json!({ "disconnect": true }))
        }
        Value::Null => None,
        Value::Object(record) => match record.get("id") {
            Some(id) if !id.is_null() => Some(json!({ "connect": { "id": id } })),
            _ if input.has_input_field("create") => Some(json!({ "create": value })),
            _ => None,
        },
        id => Some(json!({ "connect": { "id": id } })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{
        CreateParams, DeleteManyParams, GetListParams, GetManyParams, GetManyReferenceParams,
        GetOneParams, SortOrder, UpdateParams,
    };
    use crate::introspection::{IntrospectionOptions, IntrospectionSchema, OperationNames};

    fn introspection() -> IntrospectionResult {
        let schema: IntrospectionSchema =
            serde_json::from_str(include_str!("../../tests/fixtures/schema.json")).unwrap();
        IntrospectionResult::resolve(
            schema,
            &OperationNames::prisma(),
            &IntrospectionOptions::default(),
        )
        .unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {}", other),
        }
    }

    fn variables(resource: &str, params: Params) -> Value {
        let introspection = introspection();
        let resource = introspection.resource(resource).unwrap();
        Value::Object(build_variables(&introspection, resource, &params).unwrap())
    }

    #[test]
    fn test_get_list_variables() {
        let params = Params::GetList(GetListParams {
            pagination: Some(Pagination {
                page: 3,
                per_page: 10,
            }),
            sort: Some(Sort {
                field: "title".to_string(),
                order: SortOrder::Asc,
            }),
            filter: object(json!({ "ids": ["p1", "p2"], "published": true })),
        });

        assert_eq!(
            variables("Post", params),
            json!({
                "skip": 20,
                "first": 10,
                "orderBy": "title_ASC",
                "where": { "id_in": ["p1", "p2"], "published": true }
            })
        );
    }

    #[test]
    fn test_get_list_without_pagination_or_sort() {
        assert_eq!(
            variables("Post", Params::GetList(GetListParams::default())),
            json!({ "where": {} })
        );
    }

    #[test]
    fn test_get_one_and_get_many_variables() {
        assert_eq!(
            variables("User", Params::GetOne(GetOneParams { id: "u1".to_string() })),
            json!({ "where": { "id": "u1" } })
        );
        assert_eq!(
            variables(
                "User",
                Params::GetMany(GetManyParams {
                    ids: vec!["u1".to_string(), "u2".to_string()],
                })
            ),
            json!({ "where": { "id_in": ["u1", "u2"] } })
        );
    }

    #[test]
    fn test_get_many_reference_variables() {
        let params = Params::GetManyReference(GetManyReferenceParams {
            target: "author".to_string(),
            id: "u1".to_string(),
            pagination: Some(Pagination {
                page: 1,
                per_page: 5,
            }),
            sort: None,
            filter: object(json!({ "published": true })),
        });

        assert_eq!(
            variables("Post", params),
            json!({
                "skip": 0,
                "first": 5,
                "where": { "published": true, "author": { "id": "u1" } }
            })
        );
    }

    #[test]
    fn test_bulk_params_are_rejected() {
        let introspection = introspection();
        let resource = introspection.resource("User").unwrap();
        let params = Params::DeleteMany(DeleteManyParams {
            ids: vec!["u1".to_string()],
        });
        assert!(build_variables(&introspection, resource, &params).is_err());
    }

    #[test]
    fn test_where_relation_filters() {
        let introspection = introspection();
        let user = introspection.resource("User").unwrap();
        let post = introspection.resource("Post").unwrap();

        // List relation: `posts_some` exists on UserWhereInput
        assert_eq!(
            Value::Object(build_where(&introspection, user, &object(json!({ "posts.id": "p1" })))),
            json!({ "posts_some": { "id": "p1" } })
        );
        assert_eq!(
            Value::Object(build_where(
                &introspection,
                user,
                &object(json!({ "posts": ["p1", "p2"] }))
            )),
            json!({ "posts_some": { "id_in": ["p1", "p2"] } })
        );

        // Single relation
        assert_eq!(
            Value::Object(build_where(&introspection, post, &object(json!({ "author.id": "u1" })))),
            json!({ "author": { "id": "u1" } })
        );
        assert_eq!(
            Value::Object(build_where(
                &introspection,
                post,
                &object(json!({ "author.name": "Ada", "author.role": "ADMIN" }))
            )),
            json!({ "author": { "name": "Ada", "role": "ADMIN" } })
        );
    }

    #[test]
    fn test_where_coerces_scalars() {
        let introspection = introspection();
        let user = introspection.resource("User").unwrap();

        assert_eq!(
            Value::Object(build_where(
                &introspection,
                user,
                &object(json!({ "age": "42", "age_gt": "18", "age_in": ["1", "2"], "name": "7" }))
            )),
            json!({ "age": 42, "age_gt": 18, "age_in": [1, 2], "name": "7" })
        );
    }

    #[test]
    fn test_where_coerces_list_operator_items() {
        let introspection = introspection();
        let post = introspection.resource("Post").unwrap();

        assert_eq!(
            Value::Object(build_where(
                &introspection,
                post,
                &object(json!({ "views_in": ["3", 4, "x"] }))
            )),
            json!({ "views_in": [3, 4, "x"] })
        );
    }

    #[test]
    fn test_coerce_scalar() {
        assert_eq!(coerce_scalar(Some("Int"), &json!("12")), json!(12));
        assert_eq!(coerce_scalar(Some("Int"), &json!(12.7)), json!(12));
        assert_eq!(coerce_scalar(Some("Float"), &json!("1.5")), json!(1.5));
        assert_eq!(coerce_scalar(Some("Int"), &json!("abc")), json!("abc"));
        assert_eq!(coerce_scalar(Some("String"), &json!("12")), json!("12"));
        assert_eq!(coerce_scalar(None, &json!(true)), json!(true));
    }

    #[test]
    fn test_create_data() {
        let params = Params::Create(CreateParams {
            data: object(json!({
                "id": "ignored",
                "__typename": "Post",
                "title": "Hello",
                "views": "3",
                "tags": ["a", "b"],
                "authorId": "u1",
                "location": { "lat": 1.0, "lng": 2.0 },
                "unknown": "dropped"
            })),
        });

        assert_eq!(
            variables("Post", params),
            json!({
                "data": {
                    "title": "Hello",
                    "views": 3,
                    "tags": { "set": ["a", "b"] },
                    "author": { "connect": { "id": "u1" } },
                    "location": { "create": { "lat": 1.0, "lng": 2.0 } }
                }
            })
        );
    }

    #[test]
    fn test_create_list_relation_connects_all() {
        let params = Params::Create(CreateParams {
            data: object(json!({ "name": "Ada", "posts": [{ "id": "p1" }, { "id": "p2" }] })),
        });

        assert_eq!(
            variables("User", params),
            json!({
                "data": {
                    "name": "Ada",
                    "posts": { "connect": [{ "id": "p1" }, { "id": "p2" }] }
                }
            })
        );
    }

    #[test]
    fn test_update_list_relation_diffs_previous_data() {
        let params = Params::Update(UpdateParams {
            id: "u1".to_string(),
            data: object(json!({
                "name": "Ada",
                "postsIds": ["p2", "p3"],
                "posts": [{ "id": "ignored" }]
            })),
            previous_data: Some(object(json!({ "postsIds": ["p1", "p2"] }))),
        });

        assert_eq!(
            variables("User", params),
            json!({
                "where": { "id": "u1" },
                "data": {
                    "name": "Ada",
                    "posts": {
                        "connect": [{ "id": "p3" }],
                        "disconnect": [{ "id": "p1" }]
                    }
                }
            })
        );
    }

    #[test]
    fn test_update_list_relation_without_previous_data_sets() {
        let params = Params::Update(UpdateParams {
            id: "u1".to_string(),
            data: object(json!({ "postsIds": ["p1"] })),
            previous_data: None,
        });

        assert_eq!(
            variables("User", params),
            json!({
                "where": { "id": "u1" },
                "data": { "posts": { "set": [{ "id": "p1" }] } }
            })
        );
    }

    #[test]
    fn test_update_unchanged_list_relation_is_omitted() {
        let params = Params::Update(UpdateParams {
            id: "u1".to_string(),
            data: object(json!({ "postsIds": ["p1"] })),
            previous_data: Some(object(json!({ "posts": [{ "id": "p1" }] }))),
        });

        assert_eq!(
            variables("User", params),
            json!({ "where": { "id": "u1" }, "data": {} })
        );
    }

    #[test]
    fn test_update_single_relation_and_embedded_object() {
        let params = Params::Update(UpdateParams {
            id: "p1".to_string(),
            data: object(json!({
                "author": null,
                "location": { "lat": 3.5, "lng": 4.5 },
                "rating": "4.5"
            })),
            previous_data: None,
        });

        assert_eq!(
            variables("Post", params),
            json!({
                "where": { "id": "p1" },
                "data": {
                    "author": { "disconnect": true },
                    "location": { "update": { "lat": 3.5, "lng": 4.5 } },
                    "rating": 4.5
                }
            })
        );
    }

    #[test]
    fn test_relation_object_without_id_is_created() {
        let params = Params::Create(CreateParams {
            data: object(json!({ "title": "Hi", "author": { "name": "Ada" } })),
        });

        assert_eq!(
            variables("Post", params),
            json!({
                "data": {
                    "title": "Hi",
                    "author": { "create": { "name": "Ada" } }
                }
            })
        );
    }
}
