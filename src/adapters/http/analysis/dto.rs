//! Data transfer objects for the analysis endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{DeliveryStatus, RankAlternativesResult};
use crate::domain::analysis::{IdealSolution, ScoredAlternative};

/// Response body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub message: String,
    /// Name under which the result can be downloaded.
    pub result_file: String,
    pub download_url: String,
    pub email_sent: bool,
    /// Present when the ranking succeeded but e-mail delivery did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Rows in input order with score and rank.
    pub ranking: Vec<ScoredAlternative>,
    pub details: EvaluationDetails,
}

/// Intermediate values of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationDetails {
    pub criteria: Vec<String>,
    pub normalized_weights: Vec<f64>,
    pub ideal: IdealSolution,
    pub distances_best: Vec<f64>,
    pub distances_worst: Vec<f64>,
}

impl From<RankAlternativesResult> for AnalyzeResponse {
    fn from(result: RankAlternativesResult) -> Self {
        let RankAlternativesResult {
            matrix,
            evaluation,
            stored,
            delivery,
        } = result;

        let message = match &delivery {
            DeliveryStatus::Delivered { recipient } => format!(
                "TOPSIS analysis completed successfully. Results sent to {}",
                recipient
            ),
            _ => "TOPSIS analysis completed successfully".to_string(),
        };

        Self {
            success: true,
            message,
            download_url: format!("/api/results/{}", stored.name),
            result_file: stored.name,
            email_sent: matches!(delivery, DeliveryStatus::Delivered { .. }),
            warning: delivery.warning(),
            ranking: evaluation.ranking,
            details: EvaluationDetails {
                criteria: matrix.criteria().to_vec(),
                normalized_weights: evaluation.normalized_weights,
                ideal: evaluation.ideal,
                distances_best: evaluation.distances_best,
                distances_worst: evaluation.distances_worst,
            },
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
