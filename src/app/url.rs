//! Input URL validation and hostname derivation.

use log::warn;
use url::Url;

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::AnalysisError;

/// Validates and normalizes a URL submitted for analysis.
///
/// Trims whitespace, adds an `https://` prefix when no scheme is present, then
/// requires a syntactically valid http/https URL with a host. Runs before any
/// session is created, so every rejection here is cheap.
///
/// # Errors
///
/// Returns `AnalysisError::Validation` when the input is empty, longer than
/// `MAX_URL_LENGTH`, unparsable, or uses a scheme other than http/https.
pub fn validate_url(raw: &str) -> Result<Url, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::Validation("Missing url parameter".to_string()));
    }

    if trimmed.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {}): {}...",
            trimmed.len(),
            MAX_URL_LENGTH,
            trimmed.chars().take(50).collect::<String>()
        );
        return Err(AnalysisError::Validation(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    // "host:port" would otherwise parse as a URL whose scheme is the host
    let normalized = if has_scheme_prefix(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&normalized)
        .map_err(|e| AnalysisError::Validation(format!("Invalid url '{trimmed}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AnalysisError::Validation(format!(
                "Unsupported url scheme '{other}' (expected http or https)"
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(AnalysisError::Validation(format!(
            "Invalid url '{trimmed}': missing host"
        )));
    }

    Ok(parsed)
}

/// Whether the input starts with a `scheme://` prefix. Only the leading
/// segment counts, so a URL carried in the query does not.
fn has_scheme_prefix(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Derives the hostname stored alongside a result.
///
/// Uses the URL as submitted (not the post-redirect URL). Returns an empty
/// string when the input has no parsable host.
pub fn derive_hostname(raw: &str) -> String {
    Url::parse(raw.trim())
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_default()
}
