//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (impacts, table kinds, errors)
//! - `analysis` - Pure domain services for validation and TOPSIS scoring

pub mod analysis;
pub mod foundation;
