//! Result Writer Port - Serializes a ranking back into a table.

use thiserror::Error;

use crate::domain::analysis::{DecisionMatrix, ScoredAlternative};

/// Header of the appended score column.
pub const SCORE_COLUMN: &str = "Topsis Score";

/// Header of the appended rank column.
pub const RANK_COLUMN: &str = "Rank";

/// Port for serializing scored alternatives.
///
/// # Contract
///
/// The output holds the original header and rows followed by
/// [`SCORE_COLUMN`] and [`RANK_COLUMN`], rows in input order.
pub trait ResultWriter: Send + Sync {
    /// File extension (without dot) of the produced format.
    fn extension(&self) -> &'static str;

    /// MIME type of the produced format.
    fn content_type(&self) -> &'static str;

    /// Serializes the ranking.
    fn write(
        &self,
        matrix: &DecisionMatrix,
        ranking: &[ScoredAlternative],
    ) -> Result<Vec<u8>, OutputError>;
}

/// Errors raised while serializing a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutputError {
    #[error("Failed to serialize result: {message}")]
    Serialization { message: String },
}

impl OutputError {
    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}
