//! Analysis Module - Pure domain services for TOPSIS ranking.
//!
//! This module turns raw user input (weight text, impact text, table bytes)
//! into a validated decision problem, and scores that problem.
//!
//! # Components
//!
//! - `InputValidator` - Parses and cross-checks weights, impacts and the table
//! - `DecisionTable` - Identifier column plus a numeric criteria matrix
//! - `TopsisEngine` - Vector normalization, ideal points, closeness scores
//! - `ScoredTable` - Original rows with `Topsis Score` and `Rank` appended
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. Nothing here logs
//! or touches the filesystem; callers hand in bytes and get values back.

mod decision_table;
mod input_validator;
mod ranking;
mod scored_table;
mod table_reader;
mod topsis_engine;

// Re-export all public types
pub use decision_table::{
    Alternative, DecisionTable, DecisionTableBuilder, ImpactVector, RawCell, RawTable,
    WeightVector, MIN_CRITERIA,
};
pub use input_validator::InputValidator;
pub use ranking::dense_rank;
pub use scored_table::{Degeneracy, ScoredAlternative, ScoredTable, RANK_COLUMN, SCORE_COLUMN};
pub use table_reader::parse_table;
pub use topsis_engine::{TopsisEngine, ZERO_SEPARATION_SCORE};

use crate::domain::foundation::{ComputationError, TableKind, ValidationError};

/// Validates all raw inputs of one ranking request.
///
/// Checks run cheapest first: weights, impacts, their counts, then the
/// table itself. The first failure is returned.
pub fn validate(
    raw_weights: &str,
    raw_impacts: &str,
    raw_table: &[u8],
    table_kind: &TableKind,
) -> Result<(DecisionTable, WeightVector, ImpactVector), ValidationError> {
    InputValidator::validate(raw_weights, raw_impacts, raw_table, table_kind)
}

/// Scores and ranks a validated problem.
pub fn score(
    table: &DecisionTable,
    weights: &WeightVector,
    impacts: &ImpactVector,
) -> Result<ScoredTable, ComputationError> {
    TopsisEngine::compute(table, weights, impacts)
}
