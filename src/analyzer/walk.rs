//! Link accessibility walk.
//!
//! Visits every distinct absolute link target of the analyzed page, one at a
//! time, in the same session the page was loaded in. A target is inaccessible
//! when its navigation fails outright or answers with a 4xx/5xx status.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use log::{debug, trace};
use url::Url;

use crate::error_handling::{
    categorize_link_failure, is_inaccessible_status, ErrorType, InfoType, NavigationFailure,
    ProcessingStats,
};
use crate::parse::resolve_href;
use crate::session::{Session, WaitUntil};

/// Why one link target was counted as inaccessible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LinkCheckFailure {
    Status(u16),
    Navigation(NavigationFailure),
}

impl LinkCheckFailure {
    fn error_type(&self) -> ErrorType {
        match self {
            LinkCheckFailure::Status(_) => ErrorType::LinkHttpError,
            LinkCheckFailure::Navigation(failure) => categorize_link_failure(failure),
        }
    }
}

impl fmt::Display for LinkCheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkCheckFailure::Status(status) => write!(f, "HTTP {}", status),
            LinkCheckFailure::Navigation(failure) => write!(f, "{}", failure),
        }
    }
}

/// Outcome of a walk.
#[derive(Debug, Default)]
pub(crate) struct LinkWalk {
    /// Distinct targets navigated to
    pub visited: usize,
    /// Inaccessible targets, in visit order
    pub inaccessible: Vec<String>,
}

impl LinkWalk {
    pub fn inaccessible_count(&self) -> u32 {
        u32::try_from(self.inaccessible.len()).unwrap_or(u32::MAX)
    }
}

/// Checks each distinct target among `hrefs` by navigating `session` to it.
///
/// Hrefs are resolved against `page_url`; excluded and unparsable hrefs are
/// skipped. Targets are deduplicated by their exact absolute form. A failing
/// link never aborts the walk. The session's page is left on whatever was
/// visited last.
pub(crate) async fn check_links(
    session: &mut dyn Session,
    hrefs: &[String],
    page_url: &Url,
    timeout: Duration,
    stats: &ProcessingStats,
) -> LinkWalk {
    let mut seen: HashSet<String> = HashSet::new();
    let mut walk = LinkWalk::default();

    for href in hrefs {
        let Some(target) = resolve_href(href, page_url) else {
            trace!("Skipping href {:?}", href);
            continue;
        };
        if !seen.insert(target.as_str().to_string()) {
            continue;
        }

        walk.visited += 1;
        stats.increment_info(InfoType::LinkChecked);

        match check_link(session, &target, timeout).await {
            Ok(status) => trace!("Link {} answered {}", target, status),
            Err(failure) => {
                debug!("Link {} is inaccessible: {}", target, failure);
                stats.increment_error(failure.error_type());
                walk.inaccessible.push(target.into());
            }
        }
    }

    walk
}

async fn check_link(
    session: &mut dyn Session,
    target: &Url,
    timeout: Duration,
) -> Result<u16, LinkCheckFailure> {
    let navigation = session
        .navigate(target, WaitUntil::DomContentLoaded, timeout)
        .await
        .map_err(LinkCheckFailure::Navigation)?;
    if is_inaccessible_status(navigation.status) {
        return Err(LinkCheckFailure::Status(navigation.status));
    }
    Ok(navigation.status)
}
