//! HTTP API.
//!
//! Exposes the analyzer and the URL/result store:
//! - `POST /fetch-details` - analyze one URL
//! - `POST /add-url`, `GET /urls`, `POST /delete-urls` - queued URLs
//! - `POST /add-result`, `GET /results`, `POST /delete-results` - stored results
//! - `GET /status` - analysis counters
//!
//! There is no authentication and no CORS layer.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;

use handlers::{
    add_result_handler, add_url_handler, delete_results_handler, delete_urls_handler,
    fetch_details_handler, list_results_handler, list_urls_handler, root_handler, status_handler,
};
pub use types::{ApiError, AppState, MessageResponse};

/// Builds the router with every route bound to `state`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/fetch-details", post(fetch_details_handler))
        .route("/add-url", post(add_url_handler))
        .route("/urls", get(list_urls_handler))
        .route("/delete-urls", post(delete_urls_handler))
        .route("/add-result", post(add_result_handler))
        .route("/results", get(list_results_handler))
        .route("/delete-results", post(delete_results_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds `bind_addr` and serves until `shutdown` is cancelled.
pub async fn start_server(
    bind_addr: &str,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), anyhow::Error> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", bind_addr, e))?;

    log::info!("Page analyzer listening on http://{}/", bind_addr);
    log::info!("  - Analyze: POST http://{}/fetch-details", bind_addr);
    log::info!("  - Status: http://{}/status", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    log::info!("Server stopped");
    Ok(())
}
