use crate::error::Result;
use crate::models::*;

/// Session cookie storage the workspace resolver reads from
///
/// Implementations only read; the resolver never mutates the store.
pub trait CookieStore: Send {
    /// Return every cookie whose domain falls under `domain_suffix`, in store order
    fn query(&self, domain_suffix: &str) -> Result<Vec<Cookie>>;
}

/// Remote ticket source
///
/// The Jira backend implements this against the REST API; tests substitute doubles.
pub trait TicketSource: Send + Sync {
    /// Unresolved tickets assigned to the current user, most recently updated first
    fn search_assigned(&self, base_url: &WorkspaceBaseUrl, page_size: usize) -> Result<TicketPage>;

    /// Record time spent on a ticket
    fn add_worklog(&self, base_url: &WorkspaceBaseUrl, submission: &WorklogSubmission)
    -> Result<()>;
}
