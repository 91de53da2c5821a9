//! Schema descriptors handed to trace hooks by the execution pipeline.
//!
//! The pipeline owns its schema; these types are the narrow view the
//! adapter needs to name segments and decide whether a field is worth
//! timing:
//!
//! - [`kind`]: Type kind enumeration (`Scalar`, `Enum`, `Object`, ...)
//! - [`def`]: Named type and field definitions, plus wrapped type references
//!
//! Descriptors are shared through `Arc`. The adapter's per-request label
//! cache keys on the `Arc` allocation, so a pipeline must hand the same
//! `Arc` for the same schema member across hook invocations of one request.

pub mod def;
pub mod kind;

pub use def::{FieldDef, TypeDef, TypeRef};
pub use kind::TypeKind;
