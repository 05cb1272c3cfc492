// Shared helpers for integration tests.

use std::path::Path;
use std::time::Duration;

use httptest::Server;
use page_analyzer::storage::{init_db_pool_with_path, run_migrations, DbPool};
use page_analyzer::{AnalyzerConfig, PageAnalyzer};

/// Opens (or creates) an on-disk database with migrations applied.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool_with_path(db_path: &Path) -> DbPool {
    let pool = init_db_pool_with_path(db_path)
        .await
        .expect("Failed to open test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Analyzer with real HTTP sessions, no settle delay and short timeouts.
#[allow(dead_code)]
pub fn fast_analyzer() -> PageAnalyzer {
    PageAnalyzer::with_http_sessions(AnalyzerConfig {
        navigation_timeout: Duration::from_secs(5),
        link_timeout: Duration::from_secs(2),
        settle_delay: Duration::ZERO,
        ..AnalyzerConfig::default()
    })
}

/// Absolute URL for `path` on a mock server.
#[allow(dead_code)]
pub fn server_url(server: &Server, path: &str) -> String {
    format!("http://{}{}", server.addr(), path)
}

/// A local address nothing listens on.
#[allow(dead_code)]
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/", addr)
}
