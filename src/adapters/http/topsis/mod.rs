//! TOPSIS HTTP adapter - Upload endpoint for ranking tables.
//!
//! Provides endpoints for:
//! - Submitting a table with weights and impacts
//! - Receiving the ranked result as JSON or by email

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::{TopsisApiError, TopsisAppState};
pub use routes::{build_app, topsis_router};
