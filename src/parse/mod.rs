//! Document fact extraction.
//!
//! Everything the analyzer learns from a page's markup comes through here:
//! - Heading counts (`h1`..`h6`)
//! - HTML version from the doctype declaration
//! - Internal/external link classification against the page origin
//! - Login form detection
//! - Document title
//!
//! All functions are pure over a parsed `scraper::Html`, so they can be tested
//! against literal markup without a session.

mod doctype;
mod html;
mod links;

use scraper::{Html, Selector};
use url::Url;

pub use doctype::{classify_doctype, find_doctype, DoctypeDecl};
pub use html::{count_headings, extract_title, has_login_form, HeadingCounts};
pub use links::{classify_links, collect_hrefs, is_qualifying_href, resolve_href, LinkCounts};

/// Facts gathered from one rendered document in a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFacts {
    pub html_version: String,
    pub headings: HeadingCounts,
    pub internal_links: u32,
    pub external_links: u32,
    /// Every `a[href]` value in document order, duplicates and junk included
    pub link_hrefs: Vec<String>,
    pub has_login_form: bool,
}

/// Extracts all document facts, resolving links against `page_url`.
///
/// `page_url` must be the page's URL after redirects.
pub fn extract_page_facts(document: &Html, page_url: &Url) -> PageFacts {
    let link_hrefs = collect_hrefs(document);
    let LinkCounts { internal, external } = classify_links(&link_hrefs, page_url);

    PageFacts {
        html_version: classify_doctype(find_doctype(document).as_ref()),
        headings: count_headings(document),
        internal_links: internal,
        external_links: external,
        link_hrefs,
        has_login_form: has_login_form(document),
    }
}

/// Parses a static CSS selector, falling back to one that matches nothing.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| {
        log::error!("Failed to parse CSS selector '{}': {}", css, e);
        Selector::parse("*:not(*)")
            .expect("fallback selector '*:not(*)' must parse; this is a programming error")
    })
}
