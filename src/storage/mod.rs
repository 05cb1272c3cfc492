//! Persistence for queued URLs and analysis results.
//!
//! SQLite through sqlx. The schema lives in `migrations/` and is applied by
//! [`run_migrations`] at startup.

mod migrations;
mod models;
mod pool;
mod results;
#[cfg(test)]
pub(crate) mod test_helpers;
mod urls;

pub use migrations::run_migrations;
pub use models::{NewResult, StoredResult, UrlEntry};
pub use pool::{init_db_pool_with_path, DbPool};
pub use results::{add_result, delete_results, list_results};
pub use urls::{add_url, delete_urls, get_urls_by_ids, list_urls};

/// Current time as milliseconds since the Unix epoch.
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
