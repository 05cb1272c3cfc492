//! Queued URL operations.

use log::debug;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::models::UrlEntry;
use super::now_ms;
use crate::error_handling::DatabaseError;

/// Stores a URL for later analysis and returns its id.
pub async fn add_url(pool: &SqlitePool, url: &str) -> Result<i64, DatabaseError> {
    let result = sqlx::query("INSERT INTO urls (url, created_at_ms) VALUES (?, ?)")
        .bind(url)
        .bind(now_ms())
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    Ok(result.last_insert_rowid())
}

/// Lists stored URLs, newest first.
pub async fn list_urls(pool: &SqlitePool) -> Result<Vec<UrlEntry>, DatabaseError> {
    let rows = sqlx::query("SELECT id, url FROM urls ORDER BY id DESC")
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    rows.iter().map(row_to_entry).collect()
}

/// Fetches the entries for `ids`, in the order the ids are given.
///
/// Unknown ids are skipped.
pub async fn get_urls_by_ids(
    pool: &SqlitePool,
    ids: &[i64],
) -> Result<Vec<UrlEntry>, DatabaseError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut query_builder = QueryBuilder::<Sqlite>::new("SELECT id, url FROM urls WHERE id IN (");
    let mut separated = query_builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let rows = query_builder
        .build()
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    let found = rows
        .iter()
        .map(row_to_entry)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ids
        .iter()
        .filter_map(|id| found.iter().find(|entry| entry.id == *id).cloned())
        .collect())
}

/// Deletes the URLs with the given ids. Returns the number of rows removed.
pub async fn delete_urls(pool: &SqlitePool, ids: &[i64]) -> Result<u64, DatabaseError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut query_builder = QueryBuilder::<Sqlite>::new("DELETE FROM urls WHERE id IN (");
    let mut separated = query_builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let result = query_builder
        .build()
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    debug!("Deleted {} of {} requested urls", result.rows_affected(), ids.len());
    Ok(result.rows_affected())
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> Result<UrlEntry, DatabaseError> {
    Ok(UrlEntry {
        id: row.try_get("id").map_err(DatabaseError::SqlError)?,
        url: row.try_get("url").map_err(DatabaseError::SqlError)?,
    })
}
