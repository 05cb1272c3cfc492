//! Stored result handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::super::types::{ApiError, AppState, IdsRequest, MessageResponse};
use super::json_body;
use super::urls::storage_failure;
use crate::storage::{self, NewResult, StoredResult};

pub async fn add_result_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewResult>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = json_body(payload)?;
    if result.url.trim().is_empty() {
        return Err(ApiError::BadRequest("URL is required".to_string()));
    }

    let id = storage::add_result(&state.pool, &result)
        .await
        .map_err(|e| storage_failure(&state, "Failed to save result", e))?;
    Ok(Json(MessageResponse::created("Result saved", id)))
}

pub async fn list_results_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredResult>>, ApiError> {
    storage::list_results(&state.pool)
        .await
        .map(Json)
        .map_err(|e| storage_failure(&state, "Failed to fetch results", e))
}

pub async fn delete_results_handler(
    State(state): State<AppState>,
    payload: Result<Json<IdsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;
    if request.ids.is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid request or empty IDs".to_string(),
        ));
    }

    let deleted = storage::delete_results(&state.pool, &request.ids)
        .await
        .map_err(|e| storage_failure(&state, "Failed to delete results", e))?;
    Ok(Json(MessageResponse::deleted("Results deleted", deleted)))
}
