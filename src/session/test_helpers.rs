//! Scripted in-memory sessions for tests.
//!
//! A [`FakeLauncher`] serves pages from a fixed URL table and records every
//! launch, navigation and close so tests can assert on session lifecycle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{Navigation, Session, SessionLauncher, WaitUntil};
use crate::error_handling::{NavigationFailure, SessionError};

const MAX_FAKE_REDIRECTS: usize = 5;

/// What the fake web answers for one URL (fragment ignored).
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Page { status: u16, body: String },
    Redirect(String),
    Fail(NavigationFailure),
    /// Serves the page on the first visit and fails on every later one.
    PageThenFail { body: String, failure: NavigationFailure },
}

/// One recorded navigation: requested URL, wait condition, timeout.
pub type NavigationRecord = (String, WaitUntil, Duration);

#[derive(Default)]
struct Recorder {
    launched: AtomicUsize,
    closed: AtomicUsize,
    navigations: Mutex<Vec<NavigationRecord>>,
    hits: Mutex<HashMap<String, usize>>,
}

#[derive(Clone, Default)]
pub struct FakeLauncher {
    responses: Arc<HashMap<String, FakeResponse>>,
    recorder: Arc<Recorder>,
    refuse_launch: bool,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A launcher whose every launch fails.
    pub fn refusing() -> Self {
        Self {
            refuse_launch: true,
            ..Self::default()
        }
    }

    pub fn respond(mut self, url: &str, response: FakeResponse) -> Self {
        Arc::make_mut(&mut self.responses).insert(url.to_string(), response);
        self
    }

    pub fn page(self, url: &str, status: u16, body: &str) -> Self {
        self.respond(
            url,
            FakeResponse::Page {
                status,
                body: body.to_string(),
            },
        )
    }

    pub fn redirect(self, from: &str, to: &str) -> Self {
        self.respond(from, FakeResponse::Redirect(to.to_string()))
    }

    pub fn fail(self, url: &str, failure: NavigationFailure) -> Self {
        self.respond(url, FakeResponse::Fail(failure))
    }

    pub fn launched(&self) -> usize {
        self.recorder.launched.load(Ordering::SeqCst)
    }

    /// Number of `close` calls across all sessions, repeats included.
    pub fn closed(&self) -> usize {
        self.recorder.closed.load(Ordering::SeqCst)
    }

    pub fn navigations(&self) -> Vec<NavigationRecord> {
        self.recorder
            .navigations
            .lock()
            .expect("navigation log poisoned")
            .clone()
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn Session>, SessionError> {
        if self.refuse_launch {
            return Err(SessionError::Unavailable("fake runtime offline".to_string()));
        }
        self.recorder.launched.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            responses: Arc::clone(&self.responses),
            recorder: Arc::clone(&self.recorder),
            page: None,
            closed: false,
        }))
    }
}

struct FakeSession {
    responses: Arc<HashMap<String, FakeResponse>>,
    recorder: Arc<Recorder>,
    page: Option<(Url, Option<String>)>,
    closed: bool,
}

impl FakeSession {
    fn lookup(&self, url: &Url) -> Option<FakeResponse> {
        let mut key = url.clone();
        key.set_fragment(None);
        let response = self.responses.get(key.as_str())?.clone();

        let mut hits = self.recorder.hits.lock().expect("hit table poisoned");
        let visits = hits.entry(key.to_string()).or_insert(0);
        *visits += 1;
        Some(match response {
            FakeResponse::PageThenFail { body, .. } if *visits == 1 => {
                FakeResponse::Page { status: 200, body }
            }
            FakeResponse::PageThenFail { failure, .. } => FakeResponse::Fail(failure),
            other => other,
        })
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn navigate(
        &mut self,
        url: &Url,
        wait: WaitUntil,
        timeout: Duration,
    ) -> Result<Navigation, NavigationFailure> {
        self.recorder
            .navigations
            .lock()
            .expect("navigation log poisoned")
            .push((url.to_string(), wait, timeout));
        self.page = None;
        if self.closed {
            return Err(NavigationFailure::Failed("session is closed".to_string()));
        }

        let mut current = url.clone();
        for _ in 0..=MAX_FAKE_REDIRECTS {
            match self.lookup(&current) {
                Some(FakeResponse::Page { status, body }) => {
                    let document = match wait {
                        WaitUntil::NetworkIdle => Some(body),
                        WaitUntil::DomContentLoaded => None,
                    };
                    self.page = Some((current.clone(), document));
                    return Ok(Navigation {
                        url: current,
                        status,
                    });
                }
                Some(FakeResponse::Redirect(to)) => {
                    current = current
                        .join(&to)
                        .map_err(|e| NavigationFailure::Failed(e.to_string()))?;
                }
                Some(FakeResponse::Fail(failure)) => return Err(failure),
                Some(FakeResponse::PageThenFail { .. }) => unreachable!("resolved by lookup"),
                None => {
                    return Err(NavigationFailure::Failed(format!(
                        "unknown host for {}",
                        current
                    )))
                }
            }
        }
        Err(NavigationFailure::Failed("too many redirects".to_string()))
    }

    fn current_url(&self) -> Option<&Url> {
        self.page.as_ref().map(|(url, _)| url)
    }

    fn content(&self) -> Option<&str> {
        self.page.as_ref().and_then(|(_, document)| document.as_deref())
    }

    async fn close(&mut self) {
        self.recorder.closed.fetch_add(1, Ordering::SeqCst);
        self.closed = true;
        self.page = None;
    }
}
