//! Anchor collection and origin-based link classification.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::selector;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Prefixes of hrefs that never count as links. Matched case-insensitively
/// after trimming.
const EXCLUDED_PREFIXES: &[&str] = &["#", "mailto:", "javascript:", "data:"];

/// Internal and external link totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub internal: u32,
    pub external: u32,
}

/// Raw `href` values of every `a[href]` element, in document order.
pub fn collect_hrefs(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Whether an href takes part in link classification and the accessibility walk.
///
/// Empty hrefs, in-page fragments and `mailto:`/`javascript:`/`data:` targets
/// are excluded. A whitespace-only href is not empty: it resolves to the page
/// itself.
pub fn is_qualifying_href(href: &str) -> bool {
    if href.is_empty() {
        return false;
    }
    let normalized = href.trim().to_ascii_lowercase();
    !EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
}

/// Resolves a qualifying href against the page URL.
///
/// Returns `None` for excluded hrefs and for hrefs that do not parse.
pub fn resolve_href(href: &str, page_url: &Url) -> Option<Url> {
    if !is_qualifying_href(href) {
        return None;
    }
    page_url.join(href).ok()
}

/// Classifies hrefs as internal (same scheme, host and port as `page_url`) or
/// external. Excluded and unparsable hrefs count as neither. Duplicates count
/// each time they appear.
pub fn classify_links(hrefs: &[String], page_url: &Url) -> LinkCounts {
    let page_origin = page_url.origin();
    hrefs
        .iter()
        .filter_map(|href| resolve_href(href, page_url))
        .fold(LinkCounts::default(), |mut counts, resolved| {
            if resolved.origin() == page_origin {
                counts.internal += 1;
            } else {
                counts.external += 1;
            }
            counts
        })
}
