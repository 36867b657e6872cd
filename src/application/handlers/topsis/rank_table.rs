//! RankTableHandler - Command handler for validating and scoring one upload.

use tracing::{debug, info, warn};

use crate::domain::analysis::{self, ScoredTable};
use crate::domain::foundation::{TableKind, ValidationError};

use super::RankingError;

/// Command to rank the rows of an uploaded table.
#[derive(Debug, Clone)]
pub struct RankTableCommand {
    /// Name the upload arrived with; its extension selects the parser.
    pub file_name: String,
    pub content: Vec<u8>,
    pub weights: String,
    pub impacts: String,
}

impl RankTableCommand {
    /// Table kind derived from the file name's extension.
    pub fn table_kind(&self) -> TableKind {
        TableKind::from_file_name(&self.file_name)
    }
}

/// Handler for ranking tables.
///
/// Stateless; one instance can serve every request.
#[derive(Debug, Clone, Default)]
pub struct RankTableHandler;

impl RankTableHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: RankTableCommand) -> Result<ScoredTable, RankingError> {
        let kind = cmd.table_kind();
        if !kind.is_supported() {
            warn!(file_name = %cmd.file_name, "rejected unsupported upload");
            return Err(ValidationError::unsupported_format(kind.to_string()).into());
        }

        // 1. Validate raw input
        let (table, weights, impacts) =
            analysis::validate(&cmd.weights, &cmd.impacts, &cmd.content, &kind).map_err(|e| {
                debug!(file_name = %cmd.file_name, code = %e.code(), error = %e, "input rejected");
                e
            })?;

        // 2. Score
        let scored = analysis::score(&table, &weights, &impacts)?;

        for note in &scored.degeneracies {
            warn!(file_name = %cmd.file_name, ?note, "degenerate input resolved by fallback");
        }

        info!(
            file_name = %cmd.file_name,
            alternatives = scored.len(),
            criteria = scored.criteria.len(),
            degenerate = scored.is_degenerate(),
            "ranked table"
        );

        Ok(scored)
    }
}
