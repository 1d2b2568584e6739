//! HTTP handlers for analysis endpoints.
//!
//! These handlers connect Axum routes to the ranking command handler.

use std::sync::Arc;

use axum::extract::{Json, Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::{RankAlternativesCommand, RankAlternativesHandler, RankError};
use crate::ports::{ResultStore, StorageError};

use super::dto::{AnalyzeResponse, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Analysis API error that implements IntoResponse.
#[derive(Debug)]
pub enum AnalysisApiError {
    BadRequest(ErrorResponse),
    NotFound(ErrorResponse),
    Internal(ErrorResponse),
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AnalysisApiError::BadRequest(error) => (StatusCode::BAD_REQUEST, error),
            AnalysisApiError::NotFound(error) => (StatusCode::NOT_FOUND, error),
            AnalysisApiError::Internal(error) => (StatusCode::INTERNAL_SERVER_ERROR, error),
        };
        (status, Json(error)).into_response()
    }
}

impl From<RankError> for AnalysisApiError {
    fn from(error: RankError) -> Self {
        let response = ErrorResponse::new(error.code(), error.to_string());
        if error.is_client_error() {
            AnalysisApiError::BadRequest(response)
        } else {
            tracing::error!(error = %error, "Ranking failed");
            AnalysisApiError::Internal(response)
        }
    }
}

impl From<StorageError> for AnalysisApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { name } | StorageError::InvalidName { name } => {
                AnalysisApiError::NotFound(ErrorResponse::not_found("Result", &name))
            }
            StorageError::Io { .. } => {
                tracing::error!(error = %error, "Result storage failed");
                AnalysisApiError::Internal(ErrorResponse::new(error.code(), error.to_string()))
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing analysis dependencies.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub rank_handler: Arc<RankAlternativesHandler>,
    pub result_store: Arc<dyn ResultStore>,
}

impl AnalysisAppState {
    pub fn new(rank_handler: Arc<RankAlternativesHandler>, result_store: Arc<dyn ResultStore>) -> Self {
        Self {
            rank_handler,
            result_store,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Multipart Form
// ════════════════════════════════════════════════════════════════════════════════

/// Fields of the analyze form.
#[derive(Debug, Default)]
struct AnalyzeForm {
    file: Option<(String, Vec<u8>)>,
    weights: Option<String>,
    impacts: Option<String>,
    email: Option<String>,
}

impl AnalyzeForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AnalysisApiError> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(bad_multipart)?;
                    form.file = Some((filename, bytes.to_vec()));
                }
                "weights" => form.weights = Some(field.text().await.map_err(bad_multipart)?),
                "impacts" => form.impacts = Some(field.text().await.map_err(bad_multipart)?),
                "email" => form.email = Some(field.text().await.map_err(bad_multipart)?),
                _ => {}
            }
        }

        Ok(form)
    }

    fn into_command(self) -> Result<RankAlternativesCommand, AnalysisApiError> {
        let (filename, content) = self
            .file
            .ok_or_else(|| missing("No file uploaded"))?;
        if filename.trim().is_empty() {
            return Err(missing("No file selected"));
        }
        let weights = required(self.weights, "Weights are required")?;
        let impacts = required(self.impacts, "Impacts are required")?;

        Ok(RankAlternativesCommand {
            filename,
            content,
            weights,
            impacts,
            recipient: self.email,
            output_name: None,
        })
    }
}

fn bad_multipart(error: axum::extract::multipart::MultipartError) -> AnalysisApiError {
    AnalysisApiError::BadRequest(ErrorResponse::bad_request(format!(
        "Invalid multipart body: {}",
        error
    )))
}

fn missing(message: &str) -> AnalysisApiError {
    AnalysisApiError::BadRequest(ErrorResponse::bad_request(message))
}

fn required(value: Option<String>, message: &str) -> Result<String, AnalysisApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(message))
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// POST /api/analyze
///
/// Accepts a multipart form with `file`, `weights`, `impacts` and an optional
/// `email`, and returns the ranking.
pub async fn analyze(
    State(state): State<AnalysisAppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AnalysisApiError> {
    let command = AnalyzeForm::from_multipart(multipart).await?.into_command()?;
    let result = state.rank_handler.handle(command).await?;
    Ok(Json(AnalyzeResponse::from(result)))
}

/// GET /api/results/:filename
///
/// Returns a stored result file as a download.
pub async fn download_result(
    State(state): State<AnalysisAppState>,
    Path(filename): Path<String>,
) -> Result<Response, AnalysisApiError> {
    let content = state.result_store.load(&filename).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        content,
    )
        .into_response())
}
