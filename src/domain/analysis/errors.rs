//! Errors raised by the TOPSIS engine and its input value objects.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Errors that prevent a ranking from being computed.
///
/// All variants are caller-correctable; the engine never substitutes a
/// default for bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopsisError {
    #[error("{subject} has {actual} entries but the matrix has {expected} criteria")]
    ShapeMismatch {
        subject: String,
        expected: usize,
        actual: usize,
    },

    #[error("Impact #{position} '{marker}' must be '+' or '-'")]
    InvalidImpact { position: usize, marker: String },

    #[error("Weight #{position} '{value}' must be a finite number >= 0")]
    InvalidWeight { position: usize, value: String },

    #[error("Weights sum to zero")]
    DegenerateWeights,

    #[error("Value for alternative '{alternative}' on criterion '{criterion}' is not finite")]
    NonFiniteValue {
        alternative: String,
        criterion: String,
    },

    #[error("Decision matrix needs at least one alternative and one criterion")]
    EmptyMatrix,
}

impl TopsisError {
    /// Creates a shape mismatch error.
    pub fn shape_mismatch(subject: impl Into<String>, expected: usize, actual: usize) -> Self {
        TopsisError::ShapeMismatch {
            subject: subject.into(),
            expected,
            actual,
        }
    }

    /// Creates an invalid impact error. `position` is 1-based.
    pub fn invalid_impact(position: usize, marker: impl Into<String>) -> Self {
        TopsisError::InvalidImpact {
            position,
            marker: marker.into(),
        }
    }

    /// Creates an invalid weight error. `position` is 1-based.
    pub fn invalid_weight(position: usize, value: impl Into<String>) -> Self {
        TopsisError::InvalidWeight {
            position,
            value: value.into(),
        }
    }

    /// Creates a non-finite value error.
    pub fn non_finite(alternative: impl Into<String>, criterion: impl Into<String>) -> Self {
        TopsisError::NonFiniteValue {
            alternative: alternative.into(),
            criterion: criterion.into(),
        }
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            TopsisError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            TopsisError::InvalidImpact { .. } => ErrorCode::InvalidImpact,
            TopsisError::InvalidWeight { .. } => ErrorCode::InvalidWeight,
            TopsisError::DegenerateWeights => ErrorCode::DegenerateWeights,
            TopsisError::NonFiniteValue { .. } => ErrorCode::NonFiniteValue,
            TopsisError::EmptyMatrix => ErrorCode::EmptyMatrix,
        }
    }
}
