//! Decision Matrix Reader Port - Tabular input parsing interface.
//!
//! This port defines the contract for turning an uploaded table into a
//! validated `DecisionMatrix`. The engine never sees a row with missing or
//! non-numeric criterion values; readers reject them here.

use thiserror::Error;

use crate::domain::analysis::{DecisionMatrix, TopsisError};
use crate::domain::foundation::ErrorCode;

/// Port for parsing tabular files into a decision matrix.
///
/// # Contract
///
/// Implementations must:
/// - Treat the first row as the header and the first column as the opaque identifier
/// - Reject tables with fewer than [`MIN_COLUMNS`] columns
/// - Reject criterion columns containing non-numeric cells
/// - Reject rows with missing criterion values instead of imputing them
///
/// # Usage
///
/// ```rust,ignore
/// let reader: &dyn DecisionMatrixReader = get_reader();
///
/// if reader.supports("data.csv") {
///     let matrix = reader.read(&bytes)?;
/// }
/// ```
pub trait DecisionMatrixReader: Send + Sync {
    /// Returns true if this reader handles the given file name.
    fn supports(&self, filename: &str) -> bool;

    /// Parses raw file content into a decision matrix.
    fn read(&self, content: &[u8]) -> Result<DecisionMatrix, InputError>;
}

/// Minimum column count: the identifier plus two criteria.
pub const MIN_COLUMNS: usize = 3;

/// Errors raised while reading an input table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The content could not be parsed as a table at all.
    #[error("Unreadable file: {reason}")]
    UnreadableFile { reason: String },

    /// No reader handles this file type.
    #[error("Unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    /// A criterion column holds a value that is not a number.
    #[error("Column '{column}' must be numeric (row {row}: '{value}')")]
    NonNumericColumn {
        column: String,
        row: usize,
        value: String,
    },

    /// A row has no value for a criterion.
    #[error("Missing value in row {row}, column '{column}'")]
    MissingValue { row: usize, column: String },

    /// The table does not have enough columns.
    #[error("File must have at least {} columns, found {found}", MIN_COLUMNS)]
    TooFewColumns { found: usize },

    /// The parsed table violates a decision matrix invariant.
    #[error(transparent)]
    InvalidMatrix(#[from] TopsisError),
}

impl InputError {
    /// Creates an unreadable file error.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::UnreadableFile {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported(filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnreadableFile { .. } => ErrorCode::UnreadableFile,
            Self::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            Self::NonNumericColumn { .. } => ErrorCode::NonNumericColumn,
            Self::MissingValue { .. } => ErrorCode::MissingValue,
            Self::TooFewColumns { .. } => ErrorCode::TooFewColumns,
            Self::InvalidMatrix(inner) => inner.code(),
        }
    }
}
