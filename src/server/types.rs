//! Server state, request bodies and response bodies.

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

use crate::analyzer::PageAnalyzer;
use crate::storage::DbPool;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub analyzer: PageAnalyzer,
    pub start_time: Arc<Instant>,
}

impl AppState {
    pub fn new(pool: DbPool, analyzer: PageAnalyzer) -> Self {
        Self {
            pool,
            analyzer,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// `{ "url": ... }`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UrlRequest {
    pub url: String,
}

/// `{ "ids": [...] }`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdsRequest {
    pub ids: Vec<i64>,
}

/// Acknowledgement for writes.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}

impl MessageResponse {
    pub fn created(message: &str, id: i64) -> Self {
        Self {
            message: message.to_string(),
            id: Some(id),
            deleted: None,
        }
    }

    pub fn deleted(message: &str, deleted: u64) -> Self {
        Self {
            message: message.to_string(),
            id: None,
            deleted: Some(deleted),
        }
    }
}

/// Route failure, rendered as `{ "error": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub analyses: AnalysisCounts,
    pub errors: ErrorCounts,
    pub warnings: WarningCounts,
}

#[derive(Debug, Serialize)]
pub struct AnalysisCounts {
    pub started: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub redirected: usize,
    pub links_checked: usize,
    pub login_forms_detected: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub validation: usize,
    pub session: usize,
    pub navigation_timeout: usize,
    pub navigation: usize,
    pub link_http: usize,
    pub link_timeout: usize,
    pub link_network: usize,
    pub storage: usize,
}

#[derive(Debug, Serialize)]
pub struct WarningCounts {
    pub total: usize,
    pub missing_title: usize,
    pub missing_doctype: usize,
}
