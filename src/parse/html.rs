//! Basic HTML extraction utilities.
//!
//! This module provides functions to extract:
//! - Page title
//! - Heading counts
//! - Login form presence

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::selector;

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static FORM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| selector("form"));
static PASSWORD_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"input[type="password"]"#));
static HEADING_SELECTORS: LazyLock<[Selector; 6]> =
    LazyLock::new(|| std::array::from_fn(|i| selector(&format!("h{}", i + 1))));

/// Number of `h1`..`h6` elements in a document. Absent levels are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
    pub h5: u32,
    pub h6: u32,
}

impl HeadingCounts {
    /// Counts in level order, `h1` first.
    pub fn as_array(&self) -> [u32; 6] {
        [self.h1, self.h2, self.h3, self.h4, self.h5, self.h6]
    }

    pub fn from_array(counts: [u32; 6]) -> Self {
        let [h1, h2, h3, h4, h5, h6] = counts;
        Self {
            h1,
            h2,
            h3,
            h4,
            h5,
            h6,
        }
    }
}

/// Counts heading elements of each level.
pub fn count_headings(document: &Html) -> HeadingCounts {
    let counts = std::array::from_fn(|i| {
        let count = document.select(&HEADING_SELECTORS[i]).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    });
    HeadingCounts::from_array(counts)
}

/// Returns true iff some `<form>` contains an `<input type="password">`.
///
/// Stops at the first matching form.
pub fn has_login_form(document: &Html) -> bool {
    document.select(&FORM_SELECTOR).any(|form| {
        form.select(&PASSWORD_INPUT_SELECTOR).next().is_some()
    })
}

/// Extracts the document title the way browsers expose it.
///
/// Takes the first `<title>` element and strips and collapses whitespace.
/// Returns an empty string when there is no title.
pub fn extract_title(document: &Html) -> String {
    match document.select(&TITLE_SELECTOR).next() {
        Some(element) => {
            let raw: String = element.text().collect();
            let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            log::debug!("Extracted title text: '{}'", title);
            title
        }
        None => {
            log::debug!("No title element found in document");
            String::new()
        }
    }
}
