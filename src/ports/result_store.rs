//! Result Store Port - Keeps serialized results available for download.
//!
//! Results are addressed by a flat file name. Names are validated so a
//! download request can never escape the store.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Port for storing and retrieving serialized results.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Saves `content` under `name`, replacing any previous result of that name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidName` if `name` is not a safe result name.
    async fn save(&self, name: &str, content: &[u8]) -> Result<StoredResult, StorageError>;

    /// Loads a previously saved result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing is stored under `name`.
    async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError>;
}

/// A result that has been written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResult {
    /// Name to use for later retrieval.
    pub name: String,
    /// Where the result lives.
    pub path: PathBuf,
    /// Size of the stored content.
    pub size_bytes: u64,
}

/// Returns true if `name` is a single, plain file name.
///
/// Rejects empty names, path separators, parent references and hidden files.
pub fn is_safe_result_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 255
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Builds a safe result name from an uploaded file name.
///
/// `"My Data (v2).csv"` with extension `csv` becomes `"result_My_Data__v2_.csv"`.
pub fn result_name_for(upload_filename: &str, extension: &str) -> String {
    let base = upload_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(upload_filename);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = if cleaned.is_empty() { "upload".to_string() } else { cleaned };

    format!("result_{}.{}", stem, extension)
}

/// Errors that can occur during result storage operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    /// Nothing is stored under this name.
    #[error("Result not found: {name}")]
    NotFound { name: String },

    /// The name is not a plain file name.
    #[error("Invalid result name: {name}")]
    InvalidName { name: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } | Self::InvalidName { .. } => ErrorCode::NotFound,
            Self::Io { .. } => ErrorCode::StorageError,
        }
    }
}
