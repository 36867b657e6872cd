//! TOPSIS handlers - Ranking and result delivery.

mod deliver_result;
mod errors;
mod rank_table;

pub use deliver_result::{DeliverResultCommand, DeliverResultHandler};
pub use errors::RankingError;
pub use rank_table::{RankTableCommand, RankTableHandler};
