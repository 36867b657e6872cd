//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `email` - Result mailers (Resend, in-memory)
//! - `http` - Axum upload endpoint
//! - `storage` - Local result file storage

pub mod email;
pub mod http;
pub mod storage;

pub use email::{InMemoryMailer, ResendMailer};
pub use storage::LocalResultStorage;
