//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::constants::{
    DB_PATH, DEFAULT_BIND_ADDR, DEFAULT_USER_AGENT, LINK_CHECK_TIMEOUT, NAVIGATION_TIMEOUT,
    SETTLE_DELAY,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Timing knobs for a [`crate::PageAnalyzer`].
///
/// Constructed programmatically or from [`Opt`]; the defaults are the
/// production values.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Timeout for the initial load and for restoring the page after the link walk
    pub navigation_timeout: Duration,
    /// Timeout for each visited link
    pub link_timeout: Duration,
    /// Fixed wait between page load and DOM inspection
    pub settle_delay: Duration,
    /// User-Agent presented by page sessions
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            navigation_timeout: NAVIGATION_TIMEOUT,
            link_timeout: LINK_CHECK_TIMEOUT,
            settle_delay: SETTLE_DELAY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Serve the HTTP API on the default address
/// page_analyzer serve
///
/// # Analyze one page and print the report
/// page_analyzer analyze https://example.com
///
/// # Analyze every stored URL and store the results
/// page_analyzer process --all --db-path ./custom.db
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "page_analyzer",
    about = "Analyzes web pages for headings, doctype, links, login forms and broken links."
)]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Database path (SQLite file). Falls back to PAGE_ANALYZER_DB_PATH, then ./page_analyzer.db
    #[arg(long, value_parser, global = true)]
    pub db_path: Option<PathBuf>,

    /// Page load timeout in seconds
    #[arg(long, default_value_t = NAVIGATION_TIMEOUT.as_secs(), global = true)]
    pub navigation_timeout_seconds: u64,

    /// Per-link timeout in seconds for the accessibility walk
    #[arg(long, default_value_t = LINK_CHECK_TIMEOUT.as_secs(), global = true)]
    pub link_timeout_seconds: u64,

    /// Wait after page load before inspecting the document, in milliseconds
    #[arg(long, default_value_t = SETTLE_DELAY.as_millis() as u64, global = true)]
    pub settle_delay_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, global = true)]
    pub user_agent: String,
}

/// Subcommands of the CLI.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (analyzer, URL store and result store)
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_BIND_ADDR)]
        bind: String,
    },
    /// Analyze a single URL and print the report as JSON
    Analyze {
        /// URL to analyze
        url: String,
    },
    /// Store a URL for later processing
    AddUrl {
        /// URL to store
        url: String,
    },
    /// Analyze stored URLs one at a time and store the results
    Process {
        /// Process every stored URL
        #[arg(long, conflicts_with = "ids")]
        all: bool,
        /// Ids of the stored URLs to process
        ids: Vec<i64>,
    },
}

impl Opt {
    /// Builds the analyzer configuration from the parsed options.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            navigation_timeout: Duration::from_secs(self.navigation_timeout_seconds),
            link_timeout: Duration::from_secs(self.link_timeout_seconds),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Resolves the database path: `--db-path`, then `PAGE_ANALYZER_DB_PATH`, then the default.
    pub fn resolved_db_path(&self) -> PathBuf {
        resolve_db_path(
            self.db_path.clone(),
            std::env::var(crate::config::DB_PATH_ENV).ok(),
        )
    }
}

fn resolve_db_path(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DB_PATH))
}
