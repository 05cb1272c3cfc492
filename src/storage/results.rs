//! Analysis result operations.

use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::models::{NewResult, StoredResult};
use super::now_ms;
use crate::analyzer::AnalysisReport;
use crate::error_handling::DatabaseError;
use crate::parse::HeadingCounts;

const HEADING_COLUMNS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Stores a result record and returns its id.
///
/// `inaccessible_links_list` is stored as a JSON array string.
pub async fn add_result(pool: &SqlitePool, result: &NewResult) -> Result<i64, DatabaseError> {
    let report = &result.report;
    let links_json = serde_json::to_string(&report.inaccessible_links_list).map_err(|e| {
        DatabaseError::ColumnValueError {
            column: "inaccessible_links_list",
            message: e.to_string(),
        }
    })?;
    let [h1, h2, h3, h4, h5, h6] = report.headings.as_array();

    let inserted = sqlx::query(
        "INSERT INTO url_results (
             url, hostname, title, html_version, h1, h2, h3, h4, h5, h6,
             internal_links, external_links, inaccessible_links, has_login_form,
             error, inaccessible_links_list, created_at_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&result.url)
    .bind(&result.hostname)
    .bind(&report.title)
    .bind(&report.html_version)
    .bind(i64::from(h1))
    .bind(i64::from(h2))
    .bind(i64::from(h3))
    .bind(i64::from(h4))
    .bind(i64::from(h5))
    .bind(i64::from(h6))
    .bind(i64::from(report.internal_links))
    .bind(i64::from(report.external_links))
    .bind(i64::from(report.inaccessible_links))
    .bind(report.has_login_form)
    .bind(&result.error)
    .bind(links_json)
    .bind(now_ms())
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(inserted.last_insert_rowid())
}

/// Lists stored results, newest first.
pub async fn list_results(pool: &SqlitePool) -> Result<Vec<StoredResult>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT id, url, hostname, title, html_version, h1, h2, h3, h4, h5, h6,
                internal_links, external_links, inaccessible_links, has_login_form,
                error, inaccessible_links_list, created_at_ms
         FROM url_results
         ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    rows.iter().map(row_to_result).collect()
}

/// Deletes the results with the given ids. Returns the number of rows removed.
pub async fn delete_results(pool: &SqlitePool, ids: &[i64]) -> Result<u64, DatabaseError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut query_builder = QueryBuilder::<Sqlite>::new("DELETE FROM url_results WHERE id IN (");
    let mut separated = query_builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let deleted = query_builder
        .build()
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    debug!(
        "Deleted {} of {} requested results",
        deleted.rows_affected(),
        ids.len()
    );
    Ok(deleted.rows_affected())
}

fn row_to_result(row: &SqliteRow) -> Result<StoredResult, DatabaseError> {
    let mut headings = [0u32; 6];
    for (count, column) in headings.iter_mut().zip(HEADING_COLUMNS) {
        *count = get_count(row, column)?;
    }

    let links_json: String = row
        .try_get("inaccessible_links_list")
        .map_err(DatabaseError::SqlError)?;
    let inaccessible_links_list = if links_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&links_json).map_err(|e| DatabaseError::ColumnValueError {
            column: "inaccessible_links_list",
            message: e.to_string(),
        })?
    };

    Ok(StoredResult {
        id: row.try_get("id").map_err(DatabaseError::SqlError)?,
        result: NewResult {
            url: row.try_get("url").map_err(DatabaseError::SqlError)?,
            hostname: row.try_get("hostname").map_err(DatabaseError::SqlError)?,
            report: AnalysisReport {
                title: row.try_get("title").map_err(DatabaseError::SqlError)?,
                html_version: row.try_get("html_version").map_err(DatabaseError::SqlError)?,
                headings: HeadingCounts::from_array(headings),
                internal_links: get_count(row, "internal_links")?,
                external_links: get_count(row, "external_links")?,
                inaccessible_links: get_count(row, "inaccessible_links")?,
                has_login_form: row.try_get("has_login_form").map_err(DatabaseError::SqlError)?,
                inaccessible_links_list,
            },
            error: row.try_get("error").map_err(DatabaseError::SqlError)?,
        },
        created_at_ms: row.try_get("created_at_ms").map_err(DatabaseError::SqlError)?,
    })
}

fn get_count(row: &SqliteRow, column: &'static str) -> Result<u32, DatabaseError> {
    let value: i64 = row.try_get(column).map_err(DatabaseError::SqlError)?;
    u32::try_from(value).map_err(|e| DatabaseError::ColumnValueError {
        column,
        message: format!("{value}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_pool;

    fn sample_result(url: &str) -> NewResult {
        NewResult::from_report(
            url,
            "example.com".into(),
            AnalysisReport {
                title: "Example".into(),
                html_version: "HTML5".into(),
                headings: HeadingCounts::from_array([1, 2, 0, 0, 0, 3]),
                internal_links: 5,
                external_links: 2,
                inaccessible_links: 1,
                has_login_form: true,
                inaccessible_links_list: vec!["https://example.com/gone".into()],
            },
        )
    }

    #[tokio::test]
    async fn test_add_and_list_results() {
        let pool = create_test_pool().await;
        let first = add_result(&pool, &sample_result("https://example.com/"))
            .await
            .expect("insert");
        let second = add_result(&pool, &sample_result("https://example.com/about"))
            .await
            .expect("insert");

        let results = list_results(&pool).await.expect("list");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, second);
        assert_eq!(results[1].id, first);
        assert_eq!(results[1].result, sample_result("https://example.com/"));
        assert!(results[0].created_at_ms > 0);
    }

    #[tokio::test]
    async fn test_list_results_tolerates_empty_link_list_text() {
        let pool = create_test_pool().await;
        sqlx::query(
            "INSERT INTO url_results (url, inaccessible_links_list, created_at_ms)
             VALUES ('https://legacy.example', '', 0)",
        )
        .execute(pool.as_ref())
        .await
        .expect("raw insert");

        let results = list_results(&pool).await.expect("list");
        assert_eq!(results.len(), 1);
        assert!(results[0].result.report.inaccessible_links_list.is_empty());
        assert_eq!(results[0].result.report.headings, HeadingCounts::default());
    }

    #[tokio::test]
    async fn test_list_results_rejects_corrupt_link_list() {
        let pool = create_test_pool().await;
        sqlx::query(
            "INSERT INTO url_results (url, inaccessible_links_list, created_at_ms)
             VALUES ('https://broken.example', 'not json', 0)",
        )
        .execute(pool.as_ref())
        .await
        .expect("raw insert");

        let result = list_results(&pool).await;
        assert!(matches!(
            result,
            Err(DatabaseError::ColumnValueError {
                column: "inaccessible_links_list",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_delete_results() {
        let pool = create_test_pool().await;
        let a = add_result(&pool, &sample_result("https://a.example"))
            .await
            .expect("insert");
        let b = add_result(&pool, &sample_result("https://b.example"))
            .await
            .expect("insert");

        assert_eq!(delete_results(&pool, &[a]).await.expect("delete"), 1);
        let remaining = list_results(&pool).await.expect("list");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b);

        assert_eq!(delete_results(&pool, &[]).await.expect("delete"), 0);
    }
}
