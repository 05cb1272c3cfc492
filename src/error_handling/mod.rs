//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for each module seam
//! - Processing statistics tracking (errors, warnings, info metrics)
//! - Categorization of per-link failures
//!
//! Error types are categorized into:
//! - **Errors**: fatal analysis failures, plus per-link failures folded into the report
//! - **Warnings**: gaps in the analyzed document that don't prevent analysis
//! - **Info**: informational metrics (redirects, links checked, etc.)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_link_failure, is_inaccessible_status};
pub use stats::ProcessingStats;
pub use types::{
    AnalysisError, DatabaseError, ErrorType, InfoType, InitializationError, NavigationFailure,
    SessionError, WarningType,
};
