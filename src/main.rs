//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_analyzer` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use page_analyzer::app::{cancel_on_ctrl_c, print_error_statistics};
use page_analyzer::config::{Command, Opt};
use page_analyzer::initialization::init_logger_with;
use page_analyzer::server::{start_server, AppState};
use page_analyzer::storage::{self, init_db_pool_with_path, run_migrations, DbPool};
use page_analyzer::{process_all_urls, process_urls, PageAnalyzer};

#[tokio::main]
async fn main() -> Result<()> {
    // .env in the working directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(opt).await {
        eprintln!("page_analyzer error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(opt: Opt) -> Result<()> {
    let analyzer = PageAnalyzer::with_http_sessions(opt.analyzer_config());

    match &opt.command {
        Command::Analyze { url } => {
            let report = analyzer.analyze(url).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?
            );
        }
        Command::AddUrl { url } => {
            let pool = open_database(&opt).await?;
            let id = storage::add_url(&pool, url.trim())
                .await
                .context("Failed to save URL")?;
            println!("URL saved with id {}", id);
        }
        Command::Process { all, ids } => {
            if !all && ids.is_empty() {
                anyhow::bail!("Nothing to process: pass --all or one or more URL ids");
            }
            let pool = open_database(&opt).await?;
            let cancel = cancel_on_ctrl_c();
            let summary = if *all {
                process_all_urls(&pool, &analyzer, &cancel).await
            } else {
                process_urls(&pool, &analyzer, ids, &cancel).await
            }
            .context("Failed to read stored URLs")?;

            print_error_statistics(analyzer.stats());
            for (url, message) in &summary.failures {
                println!("FAILED {}: {}", url, message);
            }
            println!(
                "Processed {} URL{} ({} stored, {} failed){}",
                summary.total,
                if summary.total == 1 { "" } else { "s" },
                summary.stored,
                summary.failures.len(),
                if summary.cancelled { " - cancelled" } else { "" }
            );
        }
        Command::Serve { bind } => {
            let pool = open_database(&opt).await?;
            let state = AppState::new(Arc::clone(&pool), analyzer);
            start_server(bind, state, cancel_on_ctrl_c()).await?;
        }
    }
    Ok(())
}

async fn open_database(opt: &Opt) -> Result<DbPool> {
    let db_path = opt.resolved_db_path();
    let pool = init_db_pool_with_path(&db_path)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    run_migrations(&pool).await?;
    Ok(pool)
}
