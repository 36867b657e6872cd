//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `ResultFileStorage` - Persists ranked result files
//! - `ResultMailer` - Emails a ranked result as an attachment

mod result_file_storage;
mod result_mailer;

pub use result_file_storage::{ResultFileStorage, StorageError, StoredResult};
pub use result_mailer::{MailError, ResultEmail, ResultMailer, RESULT_ATTACHMENT_NAME};
