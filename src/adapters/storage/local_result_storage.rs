//! Local Filesystem Storage Adapter - Implementation of ResultFileStorage.
//!
//! Writes each result as `result_<YYYYmmdd_HHMMSS>.csv` under one output
//! directory. Names are claimed with exclusive creation, then filled with an
//! atomic temp-then-rename write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{ResultFileStorage, StorageError, StoredResult};

/// Maximum result size allowed (10 MB).
const MAX_RESULT_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for ranked results.
///
/// # Directory Structure
///
/// ```text
/// {output_dir}/
/// ├── result_20240315_101500.csv
/// ├── result_20240315_101500_1.csv
/// └── result_20240316_093012.csv
/// ```
///
/// Two results written within the same second get a numeric suffix instead
/// of overwriting each other, including when the writes run concurrently.
///
/// # Atomic Writes
///
/// 1. Claim `{name}` with `create_new` (next suffix on `AlreadyExists`)
/// 2. Write content to `{name}.tmp` and sync to disk
/// 3. Rename `{name}.tmp` over the claimed `{name}`
#[derive(Debug, Clone)]
pub struct LocalResultStorage {
    output_dir: PathBuf,
    max_size_bytes: u64,
}

impl LocalResultStorage {
    /// Creates a storage rooted at the given output directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            max_size_bytes: MAX_RESULT_SIZE_BYTES,
        }
    }

    /// Overrides the maximum accepted content size.
    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for a result written at `at`, with an optional collision suffix.
    fn file_name(at: DateTime<Utc>, attempt: u32) -> String {
        let stamp = at.format("%Y%m%d_%H%M%S");
        if attempt == 0 {
            format!("result_{}.csv", stamp)
        } else {
            format!("result_{}_{}.csv", stamp, attempt)
        }
    }

    /// Claims the first free file name for `at` by creating it exclusively.
    ///
    /// The empty placeholder reserves the name against concurrent writers
    /// until the real content is renamed over it.
    async fn claim_path(&self, at: DateTime<Utc>) -> Result<PathBuf, StorageError> {
        let mut attempt = 0;
        loop {
            let candidate = self.output_dir.join(Self::file_name(at, attempt));
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(_) => return Ok(candidate),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => {
                    return Err(StorageError::io(format!(
                        "Failed to claim {}: {}",
                        candidate.display(),
                        e
                    )))
                }
            }
        }
    }

    /// Writes `content` to `temp_path`, syncs it and renames it to `final_path`.
    async fn write_atomic(
        temp_path: &Path,
        final_path: &Path,
        content: &[u8],
    ) -> Result<(), StorageError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(content).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(temp_path, final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    /// Ensures the output directory exists.
    async fn ensure_output_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            tracing::error!(dir = %self.output_dir.display(), error = %e, "failed to create output directory");
            StorageError::directory_unavailable(format!("{}: {}", self.output_dir.display(), e))
        })
    }
}

#[async_trait]
impl ResultFileStorage for LocalResultStorage {
    async fn store(&self, content: &[u8]) -> Result<StoredResult, StorageError> {
        let size = content.len() as u64;
        if size > self.max_size_bytes {
            return Err(StorageError::file_too_large(size, self.max_size_bytes));
        }

        self.ensure_output_dir().await?;

        let final_path = self.claim_path(Utc::now()).await?;
        let mut temp_path = final_path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        if let Err(e) = Self::write_atomic(&temp_path, &final_path, content).await {
            let _ = fs::remove_file(&temp_path).await;
            let _ = fs::remove_file(&final_path).await;
            tracing::error!(path = %final_path.display(), error = %e, "failed to store result file");
            return Err(e);
        }

        tracing::debug!(path = %final_path.display(), size_bytes = size, "stored result file");

        Ok(StoredResult::new(final_path, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_storage() -> (LocalResultStorage, TempDir) {
        let temp = TempDir::new().unwrap();
        let storage = LocalResultStorage::new(temp.path().join("uploads"));
        (storage, temp)
    }

    #[test]
    fn file_name_uses_timestamp_pattern() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 15, 0).unwrap();
        assert_eq!(LocalResultStorage::file_name(at, 0), "result_20240315_101500.csv");
        assert_eq!(LocalResultStorage::file_name(at, 2), "result_20240315_101500_2.csv");
    }

    #[tokio::test]
    async fn store_creates_output_directory_and_file() {
        let (storage, temp) = create_storage();

        let stored = storage.store(b"Name,X,Y\nA,1,2\n").await.unwrap();

        assert!(temp.path().join("uploads").is_dir());
        assert!(stored.path.exists());
        assert!(stored.file_name.starts_with("result_"));
        assert!(stored.file_name.ends_with(".csv"));
    }

    #[tokio::test]
    async fn store_writes_exact_content() {
        let (storage, _temp) = create_storage();
        let content = b"Name,X,Y,Topsis Score,Rank\nA,1,2,0.5,1\n";

        let stored = storage.store(content).await.unwrap();

        let on_disk = tokio::fs::read(&stored.path).await.unwrap();
        assert_eq!(on_disk, content.to_vec());
        assert_eq!(stored.size_bytes, content.len() as u64);
    }

    #[tokio::test]
    async fn store_leaves_no_temp_file() {
        let (storage, _temp) = create_storage();
        storage.store(b"a,b,c\n").await.unwrap();

        let mut entries = tokio::fs::read_dir(storage.output_dir()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "left temp file {}", name);
        }
    }

    #[tokio::test]
    async fn rapid_writes_do_not_overwrite() {
        let (storage, _temp) = create_storage();

        let first = storage.store(b"first\n").await.unwrap();
        let second = storage.store(b"second\n").await.unwrap();

        assert_ne!(first.path, second.path);
        assert_eq!(tokio::fs::read(&first.path).await.unwrap(), b"first\n".to_vec());
        assert_eq!(tokio::fs::read(&second.path).await.unwrap(), b"second\n".to_vec());
    }

    #[tokio::test]
    async fn concurrent_writes_each_get_their_own_file() {
        let (storage, _temp) = create_storage();
        let storage = std::sync::Arc::new(storage);

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let storage = storage.clone();
                tokio::spawn(async move {
                    let content = format!("row,{}\n", i).into_bytes();
                    let stored = storage.store(&content).await;
                    (content, stored)
                })
            })
            .collect();

        let mut paths = std::collections::HashSet::new();
        for task in tasks {
            let (content, stored) = task.await.unwrap();
            let stored = stored.unwrap();
            assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), content);
            paths.insert(stored.path);
        }
        assert_eq!(paths.len(), 16);

        let mut entries = tokio::fs::read_dir(storage.output_dir()).await.unwrap();
        let mut on_disk = 0;
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().ends_with(".tmp"));
            on_disk += 1;
        }
        assert_eq!(on_disk, 16);
    }

    #[tokio::test]
    async fn store_rejects_oversized_content() {
        let (storage, _temp) = create_storage();
        let storage = storage.with_max_size(4);

        let result = storage.store(b"too long").await;

        assert!(matches!(
            result,
            Err(StorageError::FileTooLarge { size_bytes: 8, max_bytes: 4 })
        ));
    }
}
