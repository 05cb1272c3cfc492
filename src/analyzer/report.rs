//! The per-call analysis report.

use serde::{Deserialize, Serialize};

use crate::parse::HeadingCounts;

/// Structural metadata and link health of one page.
///
/// Built fresh by every successful `analyze` call. Serializes to the flat
/// camelCase shape callers store: `title`, `htmlVersion`, `h1`..`h6`,
/// `internalLinks`, `externalLinks`, `inaccessibleLinks`, `hasLoginForm`,
/// `inaccessibleLinksList`. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisReport {
    pub title: String,
    pub html_version: String,
    #[serde(flatten)]
    pub headings: HeadingCounts,
    pub internal_links: u32,
    pub external_links: u32,
    /// Distinct absolute link targets that failed or answered 4xx/5xx
    pub inaccessible_links: u32,
    pub has_login_form: bool,
    /// The targets counted in `inaccessible_links`, in walk order
    pub inaccessible_links_list: Vec<String>,
}
