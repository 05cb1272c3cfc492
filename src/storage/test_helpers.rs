//! Shared test helpers for storage tests.

use sqlx::SqlitePool;

use super::{run_migrations, DbPool};

/// Creates an in-memory database pool with migrations applied.
///
/// Limited to one connection: every new connection to `sqlite::memory:` opens
/// a separate empty database.
pub async fn create_test_pool() -> DbPool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    std::sync::Arc::new(pool)
}

/// Inserts a URL entry and returns its id.
pub async fn insert_test_url(pool: &SqlitePool, url: &str) -> i64 {
    super::add_url(pool, url)
        .await
        .expect("Failed to insert test url")
}
