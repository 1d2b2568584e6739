//! Analysis HTTP adapter - Upload, rank and download endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnalyzeResponse, ErrorResponse, EvaluationDetails};
pub use handlers::{AnalysisApiError, AnalysisAppState};
pub use routes::analysis_routes;
