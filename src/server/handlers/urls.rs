//! Queued URL handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use log::{error, info};

use super::super::types::{ApiError, AppState, IdsRequest, MessageResponse, UrlRequest};
use super::json_body;
use crate::error_handling::{DatabaseError, ErrorType};
use crate::storage::{self, UrlEntry};

pub async fn add_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest("URL is required".to_string()));
    }

    let id = storage::add_url(&state.pool, url)
        .await
        .map_err(|e| storage_failure(&state, "Failed to save URL", e))?;
    info!("Saved URL {} as {}", url, id);
    Ok(Json(MessageResponse::created("URL saved", id)))
}

pub async fn list_urls_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlEntry>>, ApiError> {
    storage::list_urls(&state.pool)
        .await
        .map(Json)
        .map_err(|e| storage_failure(&state, "Failed to fetch URLs", e))
}

pub async fn delete_urls_handler(
    State(state): State<AppState>,
    payload: Result<Json<IdsRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = json_body(payload)?;
    if request.ids.is_empty() {
        return Err(ApiError::BadRequest("Invalid request".to_string()));
    }

    let deleted = storage::delete_urls(&state.pool, &request.ids)
        .await
        .map_err(|e| storage_failure(&state, "Failed to delete URLs", e))?;
    Ok(Json(MessageResponse::deleted("URLs deleted", deleted)))
}

/// Logs and counts a storage error, returning a 500 with `message`.
pub(super) fn storage_failure(state: &AppState, message: &str, e: DatabaseError) -> ApiError {
    error!("{}: {}", message, e);
    state.analyzer.stats().increment_error(ErrorType::StorageError);
    ApiError::Internal(message.to_string())
}
