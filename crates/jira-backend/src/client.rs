use std::time::Duration;
use tracing::debug;
use ureq::Agent;

use crate::error::{JiraError, Result};
use crate::models::*;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Jira Cloud REST API (v2) client authenticated by session cookies
///
/// The client is not tied to one workspace; every call takes the base URL.
pub struct JiraClient {
    agent: Agent,
    session_cookie: Option<String>,
}

impl Default for JiraClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JiraClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            // Don't treat HTTP errors as errors - we'll handle them ourselves
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            session_cookie: None,
        }
    }

    /// Send this `Cookie` header value with every request
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    fn api_url(&self, base_url: &str, path: &str) -> String {
        format!("{}/rest/api/2{}", base_url.trim_end_matches('/'), path)
    }

    /// Check response status and return error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        // Jira error format: {"errorMessages":["..."], "errors":{...}}
        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            let mut messages = Vec::new();

            if let Some(errors) = error_response
                .get("errorMessages")
                .and_then(|e| e.as_array())
            {
                messages.extend(errors.iter().filter_map(|e| e.as_str()).map(String::from));
            }

            if let Some(errors) = error_response.get("errors").and_then(|e| e.as_object()) {
                for (field, msg) in errors {
                    if let Some(s) = msg.as_str() {
                        messages.push(format!("{}: {}", field, s));
                    }
                }
            }

            if messages.is_empty() {
                body
            } else {
                messages.join("; ")
            }
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        if status == 401 {
            Err(JiraError::Unauthorized)
        } else {
            Err(JiraError::Api { status, message })
        }
    }

    /// Search issues using JQL
    pub fn search_issues(
        &self,
        base_url: &str,
        jql: &str,
        max_results: usize,
    ) -> Result<JiraSearchResult> {
        let url = format!(
            "{}?jql={}&maxResults={}",
            self.api_url(base_url, "/search"),
            urlencoding::encode(jql),
            max_results
        );
        debug!(%url, "searching issues");

        let mut request = self
            .agent
            .get(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", cookie);
        }

        let response = request.call()?;
        let mut response = self.check_response(response)?;
        let result: JiraSearchResult = response.body_mut().read_json()?;
        Ok(result)
    }

    /// Add a worklog entry to an issue. The response body is not inspected.
    pub fn add_worklog(&self, base_url: &str, key: &str, time_spent: &str) -> Result<()> {
        let url = self.api_url(base_url, &format!("/issue/{}/worklog", urlencoding::encode(key)));
        debug!(%url, "adding worklog");

        let body = CreateJiraWorklog {
            time_spent: time_spent.to_string(),
        };

        let mut request = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header("Cookie", cookie);
        }

        let response = request.send_json(&body)?;
        self.check_response(response)?;
        Ok(())
    }
}
