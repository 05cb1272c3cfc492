//! HTTP client initialization.
//!
//! Each page session owns one client, so cookies and pooled connections never
//! leak between analyses.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect, ClientBuilder};

use crate::config::{CONNECT_TIMEOUT, MAX_REDIRECT_HOPS};

/// Browser-like default headers sent on every navigation.
///
/// Mirrors what a desktop Chrome sends for a top-level navigation. Nothing in
/// here identifies the client as automated.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.9"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("none"),
    );
    headers.insert(
        reqwest::header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers
}

/// Initializes the HTTP client backing one page session.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the analyzer configuration
/// - Browser-like default request headers
/// - Redirect following enabled (up to `MAX_REDIRECT_HOPS` hops)
/// - A cookie store private to this client
///
/// No overall timeout is set here; each navigation supplies its own.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_session_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .user_agent(user_agent)
        .default_headers(browser_headers())
        .redirect(redirect::Policy::limited(MAX_REDIRECT_HOPS))
        .connect_timeout(CONNECT_TIMEOUT)
        .cookie_store(true)
        .build()
}
