//! HTTP routes for analysis endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{analyze, download_result, health, AnalysisAppState};

/// Creates the analysis router with all routes.
pub fn analysis_routes(state: AnalysisAppState) -> Router {
    Router::new()
        // GET /health
        .route("/health", get(health))
        // POST /api/analyze
        .route("/api/analyze", post(analyze))
        // GET /api/results/:filename
        .route("/api/results/:filename", get(download_result))
        .with_state(state)
}
