//! Errors raised by the TOPSIS application handlers.

use thiserror::Error;

use crate::domain::foundation::{ComputationError, ErrorCode, ValidationError};
use crate::ports::{MailError, StorageError};

/// Anything that can stop a ranking request from completing.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Computation(#[from] ComputationError),

    #[error("Failed to save result file: {0}")]
    Storage(#[from] StorageError),

    #[error("Error sending email: {0}")]
    Mail(#[from] MailError),

    #[error("Failed to serialize result: {0}")]
    Serialization(String),

    #[error("Email service not configured. Contact administrator.")]
    MailNotConfigured,
}

impl RankingError {
    /// Stable code for API responses.
    pub fn code(&self) -> ErrorCode {
        match self {
            RankingError::Validation(e) => e.code(),
            RankingError::Computation(e) => e.code(),
            RankingError::Storage(_) => ErrorCode::StorageError,
            RankingError::Mail(_) => ErrorCode::MailError,
            RankingError::Serialization(_) => ErrorCode::InternalError,
            RankingError::MailNotConfigured => ErrorCode::MailNotConfigured,
        }
    }

    /// Returns true if the caller supplied bad input (as opposed to a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self, RankingError::Validation(_))
    }
}

impl From<csv::Error> for RankingError {
    fn from(err: csv::Error) -> Self {
        RankingError::Serialization(err.to_string())
    }
}
