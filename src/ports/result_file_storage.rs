//! Result File Storage Port - Persistence of ranked result files.
//!
//! The email delivery path needs the result on disk before it can be
//! attached. The application depends on this trait; adapters such as
//! `LocalResultStorage` provide the implementation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Port for writing ranked result files.
///
/// # Contract
///
/// Implementations must:
/// - Pick a fresh file name per call (callers never name files)
/// - Write atomically (no partial content on failure)
/// - Create the target directory if it doesn't exist
///
/// # Usage
///
/// ```rust,ignore
/// let storage: &dyn ResultFileStorage = get_storage();
/// let stored = storage.store(&scored.to_csv()?).await?;
/// println!("saved {}", stored.file_name);
/// ```
#[async_trait]
pub trait ResultFileStorage: Send + Sync {
    /// Persists result content and returns where it was written.
    async fn store(&self, content: &[u8]) -> Result<StoredResult, StorageError>;
}

/// Location of a persisted result file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResult {
    /// Full path of the written file.
    pub path: PathBuf,

    /// File name without the directory.
    pub file_name: String,

    /// Bytes written.
    pub size_bytes: u64,
}

impl StoredResult {
    /// Creates a stored result record from a written path.
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path,
            file_name,
            size_bytes,
        }
    }

    /// Returns the path as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

/// Errors that can occur while storing a result file.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Permission denied writing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// Output directory doesn't exist and couldn't be created.
    #[error("Output directory unavailable: {path}")]
    DirectoryUnavailable { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Content exceeds the configured maximum.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates a directory unavailable error.
    pub fn directory_unavailable(path: impl Into<String>) -> Self {
        Self::DirectoryUnavailable { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a file too large error.
    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(err.to_string())
            }
            _ => StorageError::io(err.to_string()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
