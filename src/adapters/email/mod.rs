//! Email Adapters
//!
//! Implementations of the ResultMailer port.
//!
//! - **ResendMailer** - Sends through the Resend HTTP API
//! - **InMemoryMailer** - Records messages in memory (testing/development)

mod in_memory_mailer;
mod resend_mailer;

pub use in_memory_mailer::InMemoryMailer;
pub use resend_mailer::ResendMailer;
