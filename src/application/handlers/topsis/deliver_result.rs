//! DeliverResultHandler - Command handler for saving and emailing a result.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::analysis::ScoredTable;
use crate::ports::{ResultEmail, ResultFileStorage, ResultMailer, StoredResult};

use super::RankingError;

/// Command to deliver a scored table by email.
#[derive(Debug, Clone)]
pub struct DeliverResultCommand {
    pub recipient: String,
    pub scored: ScoredTable,
}

/// Handler for result delivery.
///
/// The result file is written before the mailer is consulted, so a missing
/// or failing mailer still leaves the result on disk.
pub struct DeliverResultHandler {
    storage: Arc<dyn ResultFileStorage>,
    mailer: Option<Arc<dyn ResultMailer>>,
}

impl DeliverResultHandler {
    pub fn new(storage: Arc<dyn ResultFileStorage>, mailer: Option<Arc<dyn ResultMailer>>) -> Self {
        Self { storage, mailer }
    }

    pub async fn handle(&self, cmd: DeliverResultCommand) -> Result<StoredResult, RankingError> {
        // 1. Serialize
        let csv = cmd.scored.to_csv()?;

        // 2. Persist
        let stored = self.storage.store(&csv).await?;
        info!(path = %stored.path.display(), "saved result file");

        // 3. Send
        let Some(mailer) = &self.mailer else {
            error!("email delivery requested but no mailer is configured");
            return Err(RankingError::MailNotConfigured);
        };

        mailer
            .send_result(ResultEmail::topsis_result(&cmd.recipient, csv))
            .await?;

        Ok(stored)
    }
}
