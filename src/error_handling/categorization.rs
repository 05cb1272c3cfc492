//! Categorization of accessibility-walk outcomes.

use crate::config::{INACCESSIBLE_STATUS_MAX, INACCESSIBLE_STATUS_MIN};

use super::types::{ErrorType, NavigationFailure};

/// Returns true when a link answering with `status` counts as inaccessible.
///
/// The range is `[400, 600)`; redirects were already followed by the session.
pub fn is_inaccessible_status(status: u16) -> bool {
    (INACCESSIBLE_STATUS_MIN..INACCESSIBLE_STATUS_MAX).contains(&status)
}

/// Categorizes a failed link navigation into an `ErrorType`.
///
/// Both categories count as inaccessible in the report; the split only feeds
/// [`super::ProcessingStats`].
pub fn categorize_link_failure(failure: &NavigationFailure) -> ErrorType {
    match failure {
        NavigationFailure::Timeout(_) => ErrorType::LinkTimeout,
        NavigationFailure::Failed(_) => ErrorType::LinkNetworkError,
    }
}
