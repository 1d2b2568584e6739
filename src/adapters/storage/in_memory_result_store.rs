//! In-Memory Result Store
//!
//! Keeps results in a map. Useful for tests and for running the server
//! without a writable disk.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{is_safe_result_name, ResultStore, StorageError, StoredResult};

/// In-memory storage for result files
#[derive(Debug, Clone, Default)]
pub struct InMemoryResultStore {
    results: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryResultStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results
    pub async fn len(&self) -> usize {
        self.results.read().await.len()
    }

    /// True if nothing has been stored
    pub async fn is_empty(&self) -> bool {
        self.results.read().await.is_empty()
    }
}

#[async_trait]
impl ResultStore for InMemoryResultStore {
    async fn save(&self, name: &str, content: &[u8]) -> Result<StoredResult, StorageError> {
        if !is_safe_result_name(name) {
            return Err(StorageError::invalid_name(name));
        }

        self.results
            .write()
            .await
            .insert(name.to_string(), content.to_vec());

        Ok(StoredResult {
            name: name.to_string(),
            path: PathBuf::from(name),
            size_bytes: content.len() as u64,
        })
    }

    async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        self.results
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::not_found(name))
    }
}
