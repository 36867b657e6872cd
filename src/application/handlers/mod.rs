//! Application handlers.
//!
//! Command handlers that orchestrate domain operations and ports.

pub mod topsis;

pub use topsis::{
    DeliverResultCommand, DeliverResultHandler, RankTableCommand, RankTableHandler, RankingError,
};
