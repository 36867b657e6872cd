//! Scored Table - A decision table with TOPSIS scores and ranks appended.

use serde::{Deserialize, Serialize};

use super::RawCell;

/// Header of the appended score column in exported results.
pub const SCORE_COLUMN: &str = "Topsis Score";

/// Header of the appended rank column in exported results.
pub const RANK_COLUMN: &str = "Rank";

/// An arithmetic edge case resolved by a fixed fallback during scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degeneracy {
    /// Every value in the column is zero; its normalized values are all 0.
    ZeroNormColumn { column: String, index: usize },
    /// The row coincides with both ideal points; it got the fallback score.
    ZeroSeparation { row: usize },
}

/// One scored row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAlternative {
    pub identifier: RawCell,
    pub values: Vec<f64>,
    /// Relative closeness to the ideal, in [0, 1].
    pub score: f64,
    /// Dense rank, 1 is best.
    pub rank: u32,
}

/// Result of a TOPSIS run: original rows, in original order, with score and rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTable {
    pub identifier_header: String,
    pub criteria: Vec<String>,
    pub rows: Vec<ScoredAlternative>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degeneracies: Vec<Degeneracy>,
}

impl ScoredTable {
    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Scores in row order.
    pub fn scores(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.score).collect()
    }

    /// Ranks in row order.
    pub fn ranks(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.rank).collect()
    }

    /// Rows ranked first (more than one on a tie).
    pub fn best(&self) -> Vec<&ScoredAlternative> {
        self.rows.iter().filter(|r| r.rank == 1).collect()
    }

    /// All output headers: original columns then score and rank.
    pub fn headers(&self) -> Vec<String> {
        std::iter::once(self.identifier_header.clone())
            .chain(self.criteria.iter().cloned())
            .chain([SCORE_COLUMN.to_string(), RANK_COLUMN.to_string()])
            .collect()
    }

    /// Returns true if any fallback was applied while scoring.
    pub fn is_degenerate(&self) -> bool {
        !self.degeneracies.is_empty()
    }

    /// Serializes to comma-separated text: header row, original columns,
    /// then `Topsis Score` and `Rank`; no index column.
    pub fn to_csv(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.headers())?;

        for row in &self.rows {
            let record = std::iter::once(row.identifier.to_string())
                .chain(row.values.iter().map(f64::to_string))
                .chain([row.score.to_string(), row.rank.to_string()]);
            writer.write_record(record)?;
        }

        writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
