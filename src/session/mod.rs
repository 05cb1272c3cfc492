//! Page sessions.
//!
//! A session is one isolated browsing context holding one page at a time.
//! The analyzer drives it through a handful of primitives: navigate with a
//! wait condition and timeout, read the current document and URL, close.
//!
//! [`HttpSession`] is the default runtime. Other runtimes (or test fakes)
//! plug in through [`SessionLauncher`].

mod http;
#[cfg(test)]
pub(crate) mod test_helpers;

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error_handling::{NavigationFailure, SessionError};

pub use http::{HttpSession, HttpSessionLauncher};

/// When a navigation counts as complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// The whole document has arrived and the network has gone quiet.
    NetworkIdle,
    /// The response has started and the document can be built. Used for link checks.
    DomContentLoaded,
}

/// Result of a completed navigation.
///
/// Any HTTP status counts as completed, including 4xx/5xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Final URL after redirects
    pub url: Url,
    pub status: u16,
}

/// One isolated page session.
#[async_trait]
pub trait Session: Send {
    /// Loads `url` into the session's page.
    ///
    /// On failure the page is left without a document; callers must navigate
    /// again before reading it.
    async fn navigate(
        &mut self,
        url: &Url,
        wait: WaitUntil,
        timeout: Duration,
    ) -> Result<Navigation, NavigationFailure>;

    /// URL of the current page after redirects, if a navigation has completed.
    fn current_url(&self) -> Option<&Url>;

    /// Serialized document of the current page.
    ///
    /// `None` when nothing is loaded or the last navigation did not wait for
    /// the document.
    fn content(&self) -> Option<&str>;

    /// Releases everything the session holds. Idempotent.
    async fn close(&mut self);
}

/// Hands out fresh, independent sessions.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Session>, SessionError>;
}
