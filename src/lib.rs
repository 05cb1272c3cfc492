//! page_analyzer library: structural analysis of single web pages
//!
//! Loads a page in an isolated session and reports its title, HTML version,
//! heading counts, internal/external link split, login form presence and how
//! many of its link targets are inaccessible. Around that core sit a SQLite
//! store for queued URLs and results, a sequential batch runner, and an HTTP
//! API.
//!
//! # Example
//!
//! ```no_run
//! use page_analyzer::{AnalyzerConfig, PageAnalyzer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = PageAnalyzer::with_http_sessions(AnalyzerConfig::default());
//! let report = analyzer.analyze("https://example.com").await?;
//! println!("{} ({}): {} inaccessible links",
//!          report.title, report.html_version, report.inaccessible_links);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod analyzer;
pub mod app;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod parse;
pub mod processing;
pub mod server;
pub mod session;
pub mod storage;

// Re-export public API
pub use analyzer::{AnalysisReport, PageAnalyzer};
pub use config::{AnalyzerConfig, LogFormat, LogLevel};
pub use error_handling::{AnalysisError, NavigationFailure, ProcessingStats, SessionError};
pub use processing::{process_all_urls, process_urls, BatchSummary};
pub use session::{Session, SessionLauncher, WaitUntil};
