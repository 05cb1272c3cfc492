//! Batch processing against an on-disk database and a mock HTTP server.

mod helpers;

use std::net::SocketAddr;

use httptest::{matchers::*, responders::*, Expectation, Server};
use page_analyzer::app::derive_hostname;
use page_analyzer::storage::{add_url, list_results};
use page_analyzer::{process_all_urls, process_urls};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use helpers::{create_test_pool_with_path, fast_analyzer, refused_url, server_url};

#[tokio::test]
async fn test_process_stores_results_and_persists_them() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("batch.db");
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/a"))
            .respond_with(status_code(200).body("<!DOCTYPE html><title>A</title>")),
    );

    let pool = create_test_pool_with_path(&db_path).await;
    let ok_url = server_url(&server, "/a");
    let ok_id = add_url(&pool, &ok_url).await.expect("add");
    let bad_id = add_url(&pool, &refused_url()).await.expect("add");

    let summary = process_urls(
        &pool,
        &fast_analyzer(),
        &[ok_id, bad_id],
        &CancellationToken::new(),
    )
    .await
    .expect("batch");
    assert_eq!(summary.total, 2);
    assert_eq!(summary.stored, 1);
    assert_eq!(summary.failures.len(), 1);
    pool.close().await;

    let reopened = create_test_pool_with_path(&db_path).await;
    let results = list_results(&reopened).await.expect("list");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].result.report.title, "A");
    // The mock server binds wherever localhost resolves, IPv4 or IPv6
    let expected_host = match server.addr() {
        SocketAddr::V4(addr) => addr.ip().to_string(),
        SocketAddr::V6(addr) => format!("[{}]", addr.ip()),
    };
    assert_eq!(results[0].result.hostname, expected_host);
    assert_eq!(results[0].result.hostname, derive_hostname(&ok_url));
    assert_eq!(results[0].result.error, "");
}

#[tokio::test]
async fn test_cancelled_batch_processes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let pool = create_test_pool_with_path(&dir.path().join("cancel.db")).await;
    add_url(&pool, "https://example.invalid/").await.expect("add");

    let cancel = CancellationToken::new();
    cancel.cancel();
    let summary = process_all_urls(&pool, &fast_analyzer(), &cancel)
        .await
        .expect("batch");

    assert!(summary.cancelled);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.stored, 0);
    assert!(summary.failures.is_empty());
}
