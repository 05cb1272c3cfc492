//! HTTP-backed page session.
//!
//! Navigations are plain GET requests through a client private to the session.
//! `NetworkIdle` waits for the complete document; `DomContentLoaded` only waits
//! for the response head. No scripts run, so pages that build their DOM
//! client-side are seen as served.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use url::Url;

use super::{Navigation, Session, SessionLauncher, WaitUntil};
use crate::config::{CONNECT_TIMEOUT, MAX_RESPONSE_BODY_SIZE};
use crate::error_handling::{NavigationFailure, SessionError};
use crate::initialization::init_session_client;

/// Launches [`HttpSession`]s, each with its own client.
#[derive(Debug, Clone)]
pub struct HttpSessionLauncher {
    user_agent: String,
}

impl HttpSessionLauncher {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

#[async_trait]
impl SessionLauncher for HttpSessionLauncher {
    async fn launch(&self) -> Result<Box<dyn Session>, SessionError> {
        let client = init_session_client(&self.user_agent)?;
        debug!("Launched HTTP page session");
        Ok(Box::new(HttpSession::new(client)))
    }
}

struct LoadedPage {
    url: Url,
    document: Option<String>,
}

/// A page session backed by a dedicated `reqwest::Client`.
pub struct HttpSession {
    client: Option<reqwest::Client>,
    page: Option<LoadedPage>,
}

impl HttpSession {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client: Some(client),
            page: None,
        }
    }

    /// Whether `close` has run.
    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn navigate(
        &mut self,
        url: &Url,
        wait: WaitUntil,
        timeout: Duration,
    ) -> Result<Navigation, NavigationFailure> {
        let client = self
            .client
            .clone()
            .ok_or_else(|| NavigationFailure::Failed("session is closed".to_string()))?;
        self.page = None;

        let load = async {
            let response = client
                .get(url.clone())
                .send()
                .await
                .map_err(|e| to_navigation_failure(e, timeout))?;
            let status = response.status().as_u16();
            let final_url = response.url().clone();
            let document = match wait {
                WaitUntil::NetworkIdle => Some(read_document(response, timeout).await?),
                WaitUntil::DomContentLoaded => None,
            };
            Ok::<_, NavigationFailure>((final_url, status, document))
        };

        let (final_url, status, document) = tokio::time::timeout(timeout, load)
            .await
            .map_err(|_| NavigationFailure::Timeout(timeout))??;

        debug!("Navigated to {} (status {}, wait {:?})", final_url, status, wait);
        self.page = Some(LoadedPage {
            url: final_url.clone(),
            document,
        });
        Ok(Navigation {
            url: final_url,
            status,
        })
    }

    fn current_url(&self) -> Option<&Url> {
        self.page.as_ref().map(|page| &page.url)
    }

    fn content(&self) -> Option<&str> {
        self.page.as_ref().and_then(|page| page.document.as_deref())
    }

    async fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("Closed HTTP page session");
        }
        self.page = None;
    }
}

/// Reads the body up to `MAX_RESPONSE_BODY_SIZE`, decoding lossily as UTF-8.
async fn read_document(
    mut response: reqwest::Response,
    timeout: Duration,
) -> Result<String, NavigationFailure> {
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| to_navigation_failure(e, timeout))?
    {
        if body.len() + chunk.len() > MAX_RESPONSE_BODY_SIZE {
            body.extend_from_slice(&chunk[..MAX_RESPONSE_BODY_SIZE - body.len()]);
            warn!(
                "Document at {} exceeds {} bytes, truncating",
                response.url(),
                MAX_RESPONSE_BODY_SIZE
            );
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

fn to_navigation_failure(error: reqwest::Error, timeout: Duration) -> NavigationFailure {
    if error.is_timeout() {
        return NavigationFailure::Timeout(elapsed_limit(error.is_connect(), timeout));
    }
    // reqwest's Display omits the cause (DNS, refused, TLS); append the chain
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    NavigationFailure::Failed(message)
}

/// The limit that expired: the client's connect timeout while connecting,
/// otherwise the navigation timeout.
fn elapsed_limit(connecting: bool, timeout: Duration) -> Duration {
    if connecting {
        CONNECT_TIMEOUT.min(timeout)
    } else {
        timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn launch() -> Box<dyn Session> {
        HttpSessionLauncher::new(crate::config::DEFAULT_USER_AGENT)
            .launch()
            .await
            .expect("launch should succeed")
    }

    fn url(server: &Server, path: &str) -> Url {
        Url::parse(&format!("http://{}{}", server.addr(), path)).expect("valid url")
    }

    #[tokio::test]
    async fn test_navigate_network_idle_loads_document() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/"))
                .respond_with(status_code(200).body("<html><title>Hi</title></html>")),
        );

        let mut session = launch().await;
        let nav = session
            .navigate(&url(&server, "/"), WaitUntil::NetworkIdle, TIMEOUT)
            .await
            .expect("navigation should succeed");
        assert_eq!(nav.status, 200);
        assert_eq!(session.content(), Some("<html><title>Hi</title></html>"));
        assert_eq!(session.current_url(), Some(&url(&server, "/")));
    }

    #[tokio::test]
    async fn test_navigate_error_status_is_not_a_failure() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/missing"))
                .respond_with(status_code(404).body("gone")),
        );

        let mut session = launch().await;
        let nav = session
            .navigate(&url(&server, "/missing"), WaitUntil::NetworkIdle, TIMEOUT)
            .await
            .expect("a 404 still completes the navigation");
        assert_eq!(nav.status, 404);
        assert_eq!(session.content(), Some("gone"));
    }

    #[tokio::test]
    async fn test_navigate_follows_redirects() {
        let server = Server::run();
        let final_url = url(&server, "/final");
        server.expect(
            Expectation::matching(request::method_path("GET", "/start"))
                .respond_with(status_code(302).append_header("Location", final_url.as_str())),
        );
        server.expect(
            Expectation::matching(request::method_path("GET", "/final"))
                .respond_with(status_code(200).body("done")),
        );

        let mut session = launch().await;
        let nav = session
            .navigate(&url(&server, "/start"), WaitUntil::NetworkIdle, TIMEOUT)
            .await
            .expect("navigation should succeed");
        assert_eq!(nav.url, final_url);
        assert_eq!(session.current_url(), Some(&final_url));
    }

    #[tokio::test]
    async fn test_dom_content_loaded_skips_document() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/link"))
                .respond_with(status_code(503).body("unavailable")),
        );

        let mut session = launch().await;
        let nav = session
            .navigate(&url(&server, "/link"), WaitUntil::DomContentLoaded, TIMEOUT)
            .await
            .expect("navigation should succeed");
        assert_eq!(nav.status, 503);
        assert_eq!(session.content(), None);
    }

    #[tokio::test]
    async fn test_navigate_times_out() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/slow")).respond_with(
                delay_and_then(Duration::from_secs(3), status_code(200).body("late")),
            ),
        );

        let mut session = launch().await;
        let result = session
            .navigate(
                &url(&server, "/slow"),
                WaitUntil::NetworkIdle,
                Duration::from_millis(200),
            )
            .await;
        assert_eq!(
            result,
            Err(NavigationFailure::Timeout(Duration::from_millis(200)))
        );
        assert_eq!(session.current_url(), None);
    }

    #[tokio::test]
    async fn test_navigate_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let mut session = launch().await;
        let target = Url::parse(&format!("http://{}/", addr)).expect("valid url");
        let result = session
            .navigate(&target, WaitUntil::DomContentLoaded, TIMEOUT)
            .await;
        assert!(matches!(result, Err(NavigationFailure::Failed(_))));
    }

    #[tokio::test]
    async fn test_navigate_unsupported_scheme_fails() {
        let mut session = launch().await;
        let target = Url::parse("mailto:someone@example.com").expect("valid url");
        let result = session
            .navigate(&target, WaitUntil::DomContentLoaded, TIMEOUT)
            .await;
        assert!(matches!(result, Err(NavigationFailure::Failed(_))));
    }

    #[tokio::test]
    async fn test_closed_session_refuses_navigation() {
        let client = init_session_client(crate::config::DEFAULT_USER_AGENT).expect("client");
        let mut session = HttpSession::new(client);
        session.close().await;
        assert!(session.is_closed());
        session.close().await;

        let target = Url::parse("http://127.0.0.1:9/").expect("valid url");
        let result = session
            .navigate(&target, WaitUntil::NetworkIdle, TIMEOUT)
            .await;
        assert!(matches!(result, Err(NavigationFailure::Failed(ref m)) if m.contains("closed")));
    }

    #[test]
    fn test_connect_timeout_reports_connect_limit() {
        assert_eq!(elapsed_limit(true, Duration::from_secs(120)), CONNECT_TIMEOUT);
        assert_eq!(
            elapsed_limit(true, Duration::from_secs(2)),
            Duration::from_secs(2)
        );
        assert_eq!(
            elapsed_limit(false, Duration::from_secs(120)),
            Duration::from_secs(120)
        );
    }
}
