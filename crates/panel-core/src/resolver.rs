//! Workspace resolver
//!
//! Derives the Jira Cloud base URL from session cookies. The resolver runs on
//! its own thread and owns the cookie store; callers talk to it through a
//! [`ResolverHandle`]. Every request gets exactly one reply, including when the
//! store fails.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

use crate::models::WorkspaceBaseUrl;
use crate::traits::CookieStore;

/// Domain suffix shared by all Jira Cloud tenants
pub const JIRA_COOKIE_DOMAIN: &str = ".atlassian.net";

pub const NOT_LOGGED_IN: &str =
    "Unable to find Jira workspace URL. Make sure you're logged into Jira.";
pub const LOOKUP_FAILED: &str = "Failed to fetch Jira workspace URL.";

/// Message sent to the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ResolverRequest {
    GetBaseUrl,
}

/// Reply from the resolver; exactly one of the fields is set when produced here
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResolverResponse {
    pub fn base_url(url: &WorkspaceBaseUrl) -> Self {
        Self {
            base_url: Some(url.to_string()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            base_url: None,
            error: Some(message.into()),
        }
    }
}

/// Resolves the workspace base URL from a cookie store
pub struct WorkspaceResolver<S> {
    store: S,
}

impl<S: CookieStore> WorkspaceResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Answer a request. Never fails; store errors become an error reply.
    pub fn handle(&self, request: ResolverRequest) -> ResolverResponse {
        match request {
            ResolverRequest::GetBaseUrl => self.resolve(),
        }
    }

    fn resolve(&self) -> ResolverResponse {
        match self.store.query(JIRA_COOKIE_DOMAIN) {
            Ok(cookies) => match cookies.first() {
                Some(cookie) => {
                    let url = WorkspaceBaseUrl::from_domain(&cookie.domain);
                    info!(base_url = %url, "resolved Jira workspace");
                    ResolverResponse::base_url(&url)
                }
                None => {
                    debug!("no cookies for {}", JIRA_COOKIE_DOMAIN);
                    ResolverResponse::error(NOT_LOGGED_IN)
                }
            },
            Err(e) => {
                warn!("Error fetching Jira base URL: {}", e);
                ResolverResponse::error(LOOKUP_FAILED)
            }
        }
    }

    /// Move the resolver onto a background thread
    pub fn spawn(self) -> ResolverHandle
    where
        S: 'static,
    {
        let (tx, rx) = mpsc::channel::<Envelope>();
        let thread = thread::Builder::new()
            .name("workspace-resolver".to_string())
            .spawn(move || self.serve(rx));

        match thread {
            Ok(thread) => ResolverHandle {
                tx: Some(tx),
                thread: Some(thread),
            },
            Err(e) => {
                // Requests then see a closed channel and report "no reply"
                warn!("failed to start resolver thread: {}", e);
                ResolverHandle {
                    tx: None,
                    thread: None,
                }
            }
        }
    }

    fn serve(self, rx: Receiver<Envelope>) {
        for Envelope { request, reply } in rx {
            let response = self.handle(request);
            if reply.send(response).is_err() {
                debug!("resolver caller went away before the reply");
            }
        }
    }
}

struct Envelope {
    request: ResolverRequest,
    reply: SyncSender<ResolverResponse>,
}

/// Caller side of a spawned resolver
pub struct ResolverHandle {
    tx: Option<Sender<Envelope>>,
    thread: Option<JoinHandle<()>>,
}

impl ResolverHandle {
    /// Send one request and wait for its reply.
    ///
    /// Returns None when the resolver is gone or dropped the reply.
    pub fn request(&self, request: ResolverRequest) -> Option<ResolverResponse> {
        let tx = self.tx.as_ref()?;
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        tx.send(Envelope {
            request,
            reply: reply_tx,
        })
        .ok()?;
        reply_rx.recv().ok()
    }

    pub fn base_url(&self) -> Option<ResolverResponse> {
        self.request(ResolverRequest::GetBaseUrl)
    }
}

impl Drop for ResolverHandle {
    fn drop(&mut self) {
        // Closing the channel ends the serve loop
        self.tx.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookies::MemoryCookieStore;
    use crate::error::{PanelError, Result};
    use crate::models::Cookie;

    struct FailingStore;

    impl CookieStore for FailingStore {
        fn query(&self, _domain_suffix: &str) -> Result<Vec<Cookie>> {
            Err(PanelError::CookieStore("permission denied".to_string()))
        }
    }

    struct PanickingStore;

    impl CookieStore for PanickingStore {
        fn query(&self, _domain_suffix: &str) -> Result<Vec<Cookie>> {
            panic!("store crashed");
        }
    }

    #[test]
    fn no_matching_cookies_is_an_error() {
        let store = MemoryCookieStore::new(vec![Cookie::new("example.com", "sid", "1")]);
        let response = WorkspaceResolver::new(store).handle(ResolverRequest::GetBaseUrl);
        assert_eq!(response.error.as_deref(), Some(NOT_LOGGED_IN));
        assert!(response.base_url.is_none());
    }

    #[test]
    fn empty_store_is_an_error() {
        let response =
            WorkspaceResolver::new(MemoryCookieStore::default()).handle(ResolverRequest::GetBaseUrl);
        assert!(response.base_url.is_none());
        assert!(response.error.is_some());
    }

    #[test]
    fn first_matching_cookie_wins() {
        let store = MemoryCookieStore::new(vec![
            Cookie::new("example.com", "sid", "1"),
            Cookie::new("acme.atlassian.net", "JSESSIONID", "2"),
            Cookie::new("globex.atlassian.net", "JSESSIONID", "3"),
        ]);
        let response = WorkspaceResolver::new(store).handle(ResolverRequest::GetBaseUrl);
        assert_eq!(response.base_url.as_deref(), Some("https://acme.atlassian.net"));
        assert!(response.error.is_none());
    }

    #[test]
    fn store_failure_becomes_generic_error() {
        let response = WorkspaceResolver::new(FailingStore).handle(ResolverRequest::GetBaseUrl);
        assert_eq!(response.error.as_deref(), Some(LOOKUP_FAILED));
    }

    #[test]
    fn spawned_resolver_replies_to_each_request() {
        let store = MemoryCookieStore::new(vec![Cookie::new("acme.atlassian.net", "a", "1")]);
        let handle = WorkspaceResolver::new(store).spawn();

        for _ in 0..3 {
            let response = handle.base_url().unwrap();
            assert_eq!(response.base_url.as_deref(), Some("https://acme.atlassian.net"));
        }
    }

    #[test]
    fn spawned_resolver_replies_on_store_failure() {
        let handle = WorkspaceResolver::new(FailingStore).spawn();
        let response = handle.base_url().unwrap();
        assert_eq!(response.error.as_deref(), Some(LOOKUP_FAILED));
    }

    #[test]
    fn dead_resolver_yields_no_reply_instead_of_hanging() {
        let handle = WorkspaceResolver::new(PanickingStore).spawn();
        assert!(handle.base_url().is_none());
        assert!(handle.base_url().is_none());
    }

    #[test]
    fn messages_use_camel_case_wire_format() {
        let request = serde_json::to_string(&ResolverRequest::GetBaseUrl).unwrap();
        assert_eq!(request, r#"{"action":"getBaseUrl"}"#);

        let ok = ResolverResponse::base_url(&WorkspaceBaseUrl::from_domain("acme.atlassian.net"));
        assert_eq!(
            serde_json::to_string(&ok).unwrap(),
            r#"{"baseUrl":"https://acme.atlassian.net"}"#
        );

        let parsed: ResolverResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, ResolverResponse::default());
    }
}
