use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PanelError, Result};
use crate::status::StatusCategory;

/// Scheme and host of the Jira Cloud tenant the user is signed in to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceBaseUrl(String);

impl WorkspaceBaseUrl {
    /// Build `https://<domain>` from a cookie domain.
    ///
    /// A leading dot (domain cookie) is dropped so the result is a usable host.
    pub fn from_domain(domain: &str) -> Self {
        Self(format!("https://{}", domain.trim_start_matches('.')))
    }

    /// Accept an explicit URL such as `https://acme.atlassian.net/`
    pub fn parse(url: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| {
                PanelError::InvalidInput(format!("Base URL must start with http(s)://: {}", url))
            })?;
        if host.is_empty() {
            return Err(PanelError::InvalidInput(format!(
                "Base URL has no host: {}",
                url
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Host part without scheme or port
    pub fn host(&self) -> &str {
        let rest = self
            .0
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.0);
        let authority = rest.split('/').next().unwrap_or(rest);
        authority.split(':').next().unwrap_or(authority)
    }

    /// Web UI link for a single ticket
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.0, key)
    }

    /// Web UI link listing all of the user's open tickets
    pub fn view_all_url(&self) -> String {
        format!("{}/issues/?filter=-1", self.0)
    }
}

impl fmt::Display for WorkspaceBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only projection of a Jira issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Issue key (e.g., "ACME-1")
    pub key: String,
    /// Issue summary, untrusted user content
    pub summary: String,
    pub status: TicketStatus,
    /// Issue type icon
    pub icon_url: Option<String>,
}

/// Raw status name plus its display category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketStatus {
    pub name: String,
    pub category: StatusCategory,
}

impl TicketStatus {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let category = crate::status::classify_status(&name);
        Self { name, category }
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketPage {
    pub tickets: Vec<Ticket>,
    /// Total number of matching tickets on the server
    pub total: usize,
}

/// Time entry for a single ticket, consumed by one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorklogSubmission {
    pub ticket_key: String,
    /// Jira duration such as "1h" or "1d 2h"; validated by the server
    pub time_spent: String,
}

/// Outcome style of a per-row message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

impl FeedbackKind {
    pub fn as_class(&self) -> &'static str {
        match self {
            FeedbackKind::Success => "success",
            FeedbackKind::Error => "error",
        }
    }
}

/// Message shown next to a row's time entry control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

/// Browser session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub domain: String,
    pub name: String,
    pub value: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    /// None for session cookies
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

fn default_path() -> String {
    "/".to_string()
}

impl Cookie {
    pub fn new(domain: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            name: name.into(),
            value: value.into(),
            path: default_path(),
            secure: false,
            http_only: false,
            expires: None,
        }
    }

    /// Domain without the leading dot, lower-cased
    pub fn host(&self) -> String {
        self.domain.trim_start_matches('.').to_ascii_lowercase()
    }

    /// Whether this cookie's domain falls under `suffix` (e.g. ".atlassian.net")
    pub fn matches_suffix(&self, suffix: &str) -> bool {
        let host = self.host();
        let bare = suffix.trim_start_matches('.').to_ascii_lowercase();
        host == bare || host.ends_with(&format!(".{}", bare))
    }

    /// Whether a request to `host` would carry this cookie
    pub fn applies_to(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        let own = self.host();
        host == own || host.ends_with(&format!(".{}", own))
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_from_domain_strips_leading_dot() {
        assert_eq!(
            WorkspaceBaseUrl::from_domain("acme.atlassian.net").as_str(),
            "https://acme.atlassian.net"
        );
        assert_eq!(
            WorkspaceBaseUrl::from_domain(".acme.atlassian.net").as_str(),
            "https://acme.atlassian.net"
        );
    }

    #[test]
    fn base_url_parse_trims_trailing_slash() {
        let url = WorkspaceBaseUrl::parse("https://acme.atlassian.net/").unwrap();
        assert_eq!(url.as_str(), "https://acme.atlassian.net");
        assert_eq!(url.browse_url("ACME-1"), "https://acme.atlassian.net/browse/ACME-1");
        assert_eq!(
            url.view_all_url(),
            "https://acme.atlassian.net/issues/?filter=-1"
        );
    }

    #[test]
    fn base_url_host_drops_scheme_and_port() {
        assert_eq!(
            WorkspaceBaseUrl::from_domain("acme.atlassian.net").host(),
            "acme.atlassian.net"
        );
        assert_eq!(
            WorkspaceBaseUrl::parse("http://127.0.0.1:8080").unwrap().host(),
            "127.0.0.1"
        );
    }

    #[test]
    fn base_url_parse_rejects_missing_scheme() {
        assert!(WorkspaceBaseUrl::parse("acme.atlassian.net").is_err());
        assert!(WorkspaceBaseUrl::parse("https://").is_err());
    }

    #[test]
    fn cookie_suffix_matching() {
        assert!(Cookie::new("acme.atlassian.net", "a", "1").matches_suffix(".atlassian.net"));
        assert!(Cookie::new(".ACME.atlassian.net", "a", "1").matches_suffix(".atlassian.net"));
        assert!(Cookie::new(".atlassian.net", "a", "1").matches_suffix(".atlassian.net"));
        assert!(!Cookie::new("notatlassian.net", "a", "1").matches_suffix(".atlassian.net"));
        assert!(!Cookie::new("atlassian.com", "a", "1").matches_suffix(".atlassian.net"));
    }

    #[test]
    fn cookie_applies_to_subdomains_of_its_domain() {
        let cookie = Cookie::new(".atlassian.net", "tenant.session.token", "x");
        assert!(cookie.applies_to("acme.atlassian.net"));
        assert!(!cookie.applies_to("example.com"));

        let host_only = Cookie::new("acme.atlassian.net", "JSESSIONID", "y");
        assert!(host_only.applies_to("acme.atlassian.net"));
        assert!(!host_only.applies_to("other.atlassian.net"));
    }

    #[test]
    fn ticket_status_derives_category() {
        assert_eq!(TicketStatus::new("In Progress").category, StatusCategory::InProgress);
    }
}
