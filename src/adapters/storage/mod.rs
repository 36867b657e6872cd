//! Storage Adapters
//!
//! Implementations of the ResultFileStorage port.
//!
//! - **LocalResultStorage** - Writes timestamped CSV files to a local directory

mod local_result_storage;

pub use local_result_storage::LocalResultStorage;
