use anyhow::{Context, Result};
use jira_backend::JiraClient;
use panel_core::{
    cookie_header, CookieJarFile, ResolverResponse, WorkspaceBaseUrl, WorkspaceResolver,
    JIRA_COOKIE_DOMAIN,
};
use std::process::ExitCode;
use tracing::debug;

use crate::config::Config;
use crate::output::output_resolver_reply;

/// Ask for the workspace base URL.
///
/// An explicit `base_url` answers directly; otherwise a resolver thread reads
/// the cookie jar and replies once.
pub fn request_base_url(config: &Config) -> Result<Option<ResolverResponse>> {
    if let Some(url) = &config.base_url {
        let base_url = WorkspaceBaseUrl::parse(url)?;
        return Ok(Some(ResolverResponse::base_url(&base_url)));
    }

    let Some(path) = &config.cookies else {
        return Ok(None);
    };

    let handle = WorkspaceResolver::new(CookieJarFile::new(path)).spawn();
    Ok(handle.base_url())
}

/// HTTP client carrying the session cookies that apply to `reply`'s workspace
pub fn client_for(config: &Config, reply: Option<&ResolverResponse>) -> Result<JiraClient> {
    let client = JiraClient::with_timeout(config.timeout());

    let (Some(path), Some(url)) = (
        &config.cookies,
        reply.and_then(|r| r.base_url.as_deref()),
    ) else {
        return Ok(client);
    };

    let base_url = WorkspaceBaseUrl::parse(url)?;
    let jar = CookieJarFile::new(path);
    let header = cookie_header(&jar, JIRA_COOKIE_DOMAIN, base_url.host())
        .with_context(|| format!("Failed to read cookies from {}", path.display()))?;

    match header {
        Some(header) => Ok(client.with_session_cookie(header)),
        None => {
            debug!(host = base_url.host(), "no session cookies apply");
            Ok(client)
        }
    }
}

pub fn handle_resolve(config: &Config) -> Result<ExitCode> {
    let reply = request_base_url(config)?;
    output_resolver_reply(reply.as_ref());

    match reply {
        Some(ResolverResponse {
            base_url: Some(_), ..
        }) => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}
