//! Error types shared across layers.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
///
/// Every error surfaced to a caller maps to exactly one code, so clients can
/// branch on the code instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Engine errors
    ShapeMismatch,
    InvalidImpact,
    InvalidWeight,
    DegenerateWeights,
    NonFiniteValue,
    EmptyMatrix,

    // Input errors
    UnreadableFile,
    UnsupportedFormat,
    NonNumericColumn,
    MissingValue,
    TooFewColumns,

    // Delivery errors
    InvalidRecipient,
    DeliveryFailure,

    // Infrastructure errors
    NotFound,
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ShapeMismatch => "SHAPE_MISMATCH",
            ErrorCode::InvalidImpact => "INVALID_IMPACT",
            ErrorCode::InvalidWeight => "INVALID_WEIGHT",
            ErrorCode::DegenerateWeights => "DEGENERATE_WEIGHTS",
            ErrorCode::NonFiniteValue => "NON_FINITE_VALUE",
            ErrorCode::EmptyMatrix => "EMPTY_MATRIX",
            ErrorCode::UnreadableFile => "UNREADABLE_FILE",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::NonNumericColumn => "NON_NUMERIC_COLUMN",
            ErrorCode::MissingValue => "MISSING_VALUE",
            ErrorCode::TooFewColumns => "TOO_FEW_COLUMNS",
            ErrorCode::InvalidRecipient => "INVALID_RECIPIENT",
            ErrorCode::DeliveryFailure => "DELIVERY_FAILURE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
