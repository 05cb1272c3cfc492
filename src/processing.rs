//! Batch analysis of stored URLs.
//!
//! Runs stored URLs through the analyzer strictly one at a time and stores a
//! result record for each success. Cancellation is cooperative: an analysis in
//! flight always finishes, and the token is checked before the next one starts.

use std::time::Instant;

use log::{info, warn};
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use crate::analyzer::PageAnalyzer;
use crate::app::{derive_hostname, log_progress};
use crate::config::LOGGING_INTERVAL;
use crate::error_handling::{DatabaseError, ErrorType};
use crate::storage::{add_result, get_urls_by_ids, list_urls, NewResult};

/// Outcome of one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// URLs selected for the run
    pub total: usize,
    /// Results stored
    pub stored: usize,
    /// `(url, message)` for every analysis or store that failed
    pub failures: Vec<(String, String)>,
    /// Whether the run stopped early on cancellation
    pub cancelled: bool,
}

/// Analyzes every stored URL, oldest first.
pub async fn process_all_urls(
    pool: &SqlitePool,
    analyzer: &PageAnalyzer,
    cancel: &CancellationToken,
) -> Result<BatchSummary, DatabaseError> {
    let mut ids: Vec<i64> = list_urls(pool).await?.into_iter().map(|e| e.id).collect();
    ids.reverse();
    process_urls(pool, analyzer, &ids, cancel).await
}

/// Analyzes the stored URLs with the given ids, in the given order.
///
/// Failed analyses are not stored; they are collected in
/// [`BatchSummary::failures`]. Nothing is retried.
///
/// # Errors
///
/// Returns an error only when the URLs cannot be read from storage.
pub async fn process_urls(
    pool: &SqlitePool,
    analyzer: &PageAnalyzer,
    ids: &[i64],
    cancel: &CancellationToken,
) -> Result<BatchSummary, DatabaseError> {
    let entries = get_urls_by_ids(pool, ids).await?;
    if entries.len() < ids.len() {
        warn!(
            "{} of {} requested URL ids were not found",
            ids.len() - entries.len(),
            ids.len()
        );
    }

    let mut summary = BatchSummary {
        total: entries.len(),
        ..Default::default()
    };
    let start_time = Instant::now();

    for (index, entry) in entries.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(
                "Batch cancelled after {} of {} URLs",
                index, summary.total
            );
            summary.cancelled = true;
            break;
        }

        match analyzer.analyze(&entry.url).await {
            Ok(report) => {
                let record =
                    NewResult::from_report(&entry.url, derive_hostname(&entry.url), report);
                match add_result(pool, &record).await {
                    Ok(_) => summary.stored += 1,
                    Err(e) => {
                        analyzer.stats().increment_error(ErrorType::StorageError);
                        warn!("Failed to store result for {}: {}", entry.url, e);
                        summary.failures.push((entry.url.clone(), e.to_string()));
                    }
                }
            }
            Err(e) => summary.failures.push((entry.url.clone(), e.to_string())),
        }

        if (index + 1) % LOGGING_INTERVAL == 0 {
            log_progress(start_time, index + 1, summary.total);
        }
    }

    info!(
        "Processed {} URL{} ({} stored, {} failed){}",
        summary.total,
        if summary.total == 1 { "" } else { "s" },
        summary.stored,
        summary.failures.len(),
        if summary.cancelled { ", cancelled" } else { "" }
    );
    Ok(summary)
}
