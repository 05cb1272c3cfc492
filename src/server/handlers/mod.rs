//! Route handlers.

mod analyze;
mod results;
mod status;
mod urls;

pub use analyze::{fetch_details_handler, root_handler};
pub use results::{add_result_handler, delete_results_handler, list_results_handler};
pub use status::status_handler;
pub use urls::{add_url_handler, delete_urls_handler, list_urls_handler};

use axum::extract::rejection::JsonRejection;
use axum::Json;

use super::types::ApiError;

/// Unwraps a JSON body, mapping malformed input to a 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        log::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("Invalid request".to_string())
    })
}
