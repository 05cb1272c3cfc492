//! Analysis handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::super::types::{ApiError, AppState, UrlRequest};
use super::json_body;
use crate::analyzer::AnalysisReport;

/// Liveness text
pub async fn root_handler() -> &'static str {
    "Page analyzer is running"
}

/// Runs one analysis and returns the report.
///
/// Validation errors are 400; session and navigation errors are 500.
pub async fn fetch_details_handler(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let request = json_body(payload)?;
    state
        .analyzer
        .analyze(&request.url)
        .await
        .map(Json)
        .map_err(|e| {
            if e.is_client_error() {
                ApiError::BadRequest(e.to_string())
            } else {
                ApiError::Internal(e.to_string())
            }
        })
}
