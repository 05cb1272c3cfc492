//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, ports)
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{AnalyzerConfig, Command, LogFormat, LogLevel, Opt};
