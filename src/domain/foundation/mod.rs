//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, enums, and error types that form the vocabulary
//! of the ranking domain.

mod errors;
mod impact;
mod table_kind;

pub use errors::{ComputationError, ErrorCode, InputField, NonNumericColumn, ValidationError};
pub use impact::Impact;
pub use table_kind::TableKind;
