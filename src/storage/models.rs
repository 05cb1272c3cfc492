//! Database models.

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisReport;

/// A URL queued for analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntry {
    pub id: i64,
    pub url: String,
}

/// A result record as submitted for storage.
///
/// Serializes flat, with the report fields alongside `url`, `hostname` and
/// `error`. `error` is empty for successful analyses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewResult {
    pub url: String,
    pub hostname: String,
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub error: String,
}

impl NewResult {
    pub fn from_report(url: &str, hostname: String, report: AnalysisReport) -> Self {
        Self {
            url: url.to_string(),
            hostname,
            report,
            error: String::new(),
        }
    }
}

/// A stored result record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub id: i64,
    #[serde(flatten)]
    pub result: NewResult,
    /// Milliseconds since the Unix epoch
    pub created_at_ms: i64,
}
