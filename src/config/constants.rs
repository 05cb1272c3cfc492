//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, size limits, and default locations.

use std::time::Duration;

/// Timeout for loading the analyzed page (initial load and the restore after the link walk).
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for each link visited during the accessibility walk.
pub const LINK_CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// Connect timeout for session clients. Per-navigation timeouts are applied on
/// each request and are usually longer.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Grace period between page load and DOM inspection.
///
/// Heuristic only: client-side rendering may still be in flight when it elapses.
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

pub const DB_PATH: &str = "./page_analyzer.db";

/// Environment variable consulted for the database path when `--db-path` is not given.
pub const DB_PATH_ENV: &str = "PAGE_ANALYZER_DB_PATH";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:4000";

/// Default User-Agent string for page sessions.
///
/// A plain Chrome-on-Windows string. Automation tooling usually announces itself
/// in the User-Agent; this one does not. Users can override it via `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// URL validation
/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

// Response and body size limits
/// Maximum document size in bytes (2MB).
/// Larger documents are truncated before parsing.
pub const MAX_RESPONSE_BODY_SIZE: usize = 2 * 1024 * 1024;

// Redirect handling
/// Maximum number of redirect hops a session follows per navigation
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Progress is logged every N URLs during batch processing
pub const LOGGING_INTERVAL: usize = 5;

// HTTP status range counted as an inaccessible link
pub const INACCESSIBLE_STATUS_MIN: u16 = 400;
pub const INACCESSIBLE_STATUS_MAX: u16 = 600;
