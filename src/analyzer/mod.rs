//! Single-page analysis.
//!
//! [`PageAnalyzer::analyze`] loads one URL in a fresh session and reports its
//! title, HTML version, heading counts, link split, login form presence and
//! how many of its link targets are inaccessible.
//!
//! Each call owns its session from launch to close; concurrent calls share
//! nothing but the statistics counters.

mod report;
mod walk;

use std::sync::Arc;

use log::{debug, info, warn};
use scraper::Html;
use url::Url;

use crate::app::validate_url;
use crate::config::AnalyzerConfig;
use crate::error_handling::{AnalysisError, InfoType, ProcessingStats, WarningType};
use crate::parse::{extract_page_facts, extract_title};
use crate::session::{HttpSessionLauncher, Session, SessionLauncher, WaitUntil};

pub use report::AnalysisReport;

/// Analyzes pages through sessions handed out by a [`SessionLauncher`].
#[derive(Clone)]
pub struct PageAnalyzer {
    launcher: Arc<dyn SessionLauncher>,
    config: AnalyzerConfig,
    stats: Arc<ProcessingStats>,
}

impl PageAnalyzer {
    pub fn new(
        launcher: Arc<dyn SessionLauncher>,
        config: AnalyzerConfig,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            launcher,
            config,
            stats,
        }
    }

    /// Analyzer backed by [`crate::session::HttpSession`]s using the configured user agent.
    pub fn with_http_sessions(config: AnalyzerConfig) -> Self {
        let launcher = Arc::new(HttpSessionLauncher::new(config.user_agent.clone()));
        Self::new(launcher, config, Arc::new(ProcessingStats::new()))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Analyzes the page at `raw_url`.
    ///
    /// The URL is validated before any session is launched. Once launched, the
    /// session is closed exactly once whether the analysis succeeds or fails.
    /// Per-link failures only feed the inaccessible-link counter; the call
    /// fails only when the page itself (or its restore after the link walk)
    /// cannot be loaded.
    pub async fn analyze(&self, raw_url: &str) -> Result<AnalysisReport, AnalysisError> {
        let result = self.launch_and_analyze(raw_url).await;
        match &result {
            Ok(report) => {
                self.stats.increment_info(InfoType::AnalysisCompleted);
                info!(
                    "Analyzed {}: {} internal, {} external, {} inaccessible",
                    raw_url.trim(),
                    report.internal_links,
                    report.external_links,
                    report.inaccessible_links
                );
            }
            Err(e) => {
                self.stats.increment_error(e.error_type());
                warn!("Analysis of {} failed: {}", raw_url.trim(), e);
            }
        }
        result
    }

    async fn launch_and_analyze(&self, raw_url: &str) -> Result<AnalysisReport, AnalysisError> {
        let url = validate_url(raw_url)?;
        self.stats.increment_info(InfoType::AnalysisStarted);

        let mut session = self.launcher.launch().await?;
        let result = self.analyze_in_session(session.as_mut(), &url).await;
        session.close().await;
        result
    }

    async fn analyze_in_session(
        &self,
        session: &mut dyn Session,
        url: &Url,
    ) -> Result<AnalysisReport, AnalysisError> {
        let navigation_timeout = self.config.navigation_timeout;

        let landing = session
            .navigate(url, WaitUntil::NetworkIdle, navigation_timeout)
            .await
            .map_err(|source| AnalysisError::Navigation {
                url: url.to_string(),
                source,
            })?;
        if landing.url != *url {
            debug!("{} redirected to {}", url, landing.url);
            self.stats.increment_info(InfoType::PageRedirected);
        }
        let page_url = landing.url;

        if !self.config.settle_delay.is_zero() {
            tokio::time::sleep(self.config.settle_delay).await;
        }

        // scraper's Html is !Send; it must be dropped before the next await
        let facts = {
            let document = Html::parse_document(session.content().unwrap_or_default());
            extract_page_facts(&document, &page_url)
        };
        debug!(
            "Found {} anchors on {} ({} internal, {} external)",
            facts.link_hrefs.len(),
            page_url,
            facts.internal_links,
            facts.external_links
        );

        let walk = walk::check_links(
            session,
            &facts.link_hrefs,
            &page_url,
            self.config.link_timeout,
            &self.stats,
        )
        .await;

        if walk.visited > 0 {
            session
                .navigate(&page_url, WaitUntil::NetworkIdle, navigation_timeout)
                .await
                .map_err(|source| AnalysisError::Navigation {
                    url: page_url.to_string(),
                    source,
                })?;
        }

        let title = {
            let document = Html::parse_document(session.content().unwrap_or_default());
            extract_title(&document)
        };

        if title.is_empty() {
            self.stats.increment_warning(WarningType::MissingTitle);
        }
        if facts.html_version == "Unknown" {
            self.stats.increment_warning(WarningType::MissingDoctype);
        }
        if facts.has_login_form {
            self.stats.increment_info(InfoType::LoginFormDetected);
        }

        Ok(AnalysisReport {
            title,
            html_version: facts.html_version,
            headings: facts.headings,
            internal_links: facts.internal_links,
            external_links: facts.external_links,
            inaccessible_links: walk.inaccessible_count(),
            has_login_form: facts.has_login_form,
            inaccessible_links_list: walk.inaccessible,
        })
    }
}
