//! Result Mailer Port - Outbound email with the ranked result attached.

use async_trait::async_trait;
use thiserror::Error;

/// File name the result is attached under.
pub const RESULT_ATTACHMENT_NAME: &str = "topsis_result.csv";

/// Port for mailing a ranked result to a recipient.
///
/// Implementations own their transport configuration; callers only supply
/// the message.
#[async_trait]
pub trait ResultMailer: Send + Sync {
    /// Sends one message. Fails without retrying.
    async fn send_result(&self, message: ResultEmail) -> Result<(), MailError>;
}

/// An email carrying one CSV attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment_name: String,
    pub attachment: Vec<u8>,
}

impl ResultEmail {
    /// Builds the standard result message for a recipient.
    pub fn topsis_result(to: impl Into<String>, attachment: Vec<u8>) -> Self {
        Self {
            to: to.into(),
            subject: "TOPSIS Analysis Result".to_string(),
            body: "Dear User,\n\nPlease find attached your TOPSIS analysis result file.\n\nBest regards,\nTOPSIS Web Service".to_string(),
            attachment_name: RESULT_ATTACHMENT_NAME.to_string(),
            attachment,
        }
    }
}

/// Errors raised while sending mail.
#[derive(Debug, Clone, Error)]
pub enum MailError {
    /// The provider could not be reached.
    #[error("Mail transport failed: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("Mail provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The message itself is unusable (bad recipient, empty attachment).
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

impl MailError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a rejection error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Returns true if retrying the same message could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MailError::Transport(_) => true,
            MailError::Rejected { status, .. } => *status == 429 || *status >= 500,
            MailError::InvalidMessage(_) => false,
        }
    }
}
