//! In-Memory Mailer Adapter
//!
//! Records sent messages instead of delivering them.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{MailError, ResultEmail, ResultMailer};

/// In-memory mailer that keeps every message it is asked to send
#[derive(Debug, Clone, Default)]
pub struct InMemoryMailer {
    sent: Arc<RwLock<Vec<ResultEmail>>>,
    failure: Option<MailError>,
}

impl InMemoryMailer {
    /// Create a mailer that accepts every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mailer that fails every send with the given error
    pub fn failing(error: MailError) -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
            failure: Some(error),
        }
    }

    /// Messages accepted so far, in send order
    pub async fn sent(&self) -> Vec<ResultEmail> {
        self.sent.read().await.clone()
    }

    /// Get the number of accepted messages
    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl ResultMailer for InMemoryMailer {
    async fn send_result(&self, message: ResultEmail) -> Result<(), MailError> {
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        self.sent.write().await.push(message);
        Ok(())
    }
}
