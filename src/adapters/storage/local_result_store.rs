//! Local Filesystem Result Store - Implementation of ResultStore.
//!
//! Keeps result files in a single flat directory so that they can be served
//! for download by name.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::ports::{is_safe_result_name, ResultStore, StorageError, StoredResult};

/// Result files on the local filesystem.
///
/// # Atomic Writes
///
/// Content is written to a uniquely named hidden temp file, synced, then
/// renamed over `{name}`. A reader never observes a half-written result, and
/// a failed save leaves no temp file behind.
#[derive(Debug, Clone)]
pub struct LocalResultStore {
    base_path: PathBuf,
}

impl LocalResultStore {
    /// Creates a store rooted at `base_path`. The directory is created on first save.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the directory results are written to.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn result_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_result_name(name) {
            return Err(StorageError::invalid_name(name));
        }
        Ok(self.base_path.join(name))
    }

    /// A hidden, per-save temp name. Concurrent saves of the same result
    /// never share a temp file, and the name is never a valid result name.
    fn temp_path(&self, name: &str) -> PathBuf {
        self.base_path
            .join(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
    }

    async fn write_and_publish(
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
        drop(file);

        fs::rename(temp_path, final_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create results directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl ResultStore for LocalResultStore {
    async fn save(&self, name: &str, content: &[u8]) -> Result<StoredResult, StorageError> {
        let final_path = self.result_path(name)?;
        self.ensure_dir().await?;

        let temp_path = self.temp_path(name);

        if let Err(e) = Self::write_and_publish(&temp_path, &final_path, content).await {
            // Best-effort cleanup.
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        tracing::debug!(path = %final_path.display(), bytes = content.len(), "Result saved");

        Ok(StoredResult {
            name: name.to_string(),
            path: final_path,
            size_bytes: content.len() as u64,
        })
    }

    async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        // An unsafe name cannot have been saved; report it as missing.
        let path = self
            .result_path(name)
            .map_err(|_| StorageError::not_found(name))?;

        fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::not_found(name),
            _ => StorageError::io(format!("Failed to read {}: {}", path.display(), e)),
        })
    }
}
