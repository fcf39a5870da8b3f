//! Schema introspection and operation naming
//!
//! Discovers which schema types are resources and which query or mutation
//! serves each fetch type for them.

pub mod operation_names;
pub mod resolver;
pub mod schema;

pub use operation_names::{OperationNameFn, OperationNames};
pub use resolver::{
    IntrospectedResource, IntrospectionOptions, IntrospectionResult, introspect_schema,
    resolve_introspection,
};
pub use schema::{
    Field, FullType, INTROSPECTION_QUERY, InputValue, IntrospectionSchema, TypeKind, TypeRef,
};
