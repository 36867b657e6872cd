//! HTTP adapters - REST API implementations.

pub mod topsis;

pub use topsis::{build_app, topsis_router, TopsisAppState};
