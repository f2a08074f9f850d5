//! Implementation of panel-core traits for JiraClient

use panel_core::{
    PanelError, Result, TicketPage, TicketSource, WorklogSubmission, WorkspaceBaseUrl,
    ASSIGNED_JQL,
};

use crate::client::JiraClient;

impl TicketSource for JiraClient {
    fn search_assigned(&self, base_url: &WorkspaceBaseUrl, page_size: usize) -> Result<TicketPage> {
        self.search_issues(base_url.as_str(), ASSIGNED_JQL, page_size)
            .map(Into::into)
            .map_err(PanelError::from)
    }

    fn add_worklog(&self, base_url: &WorkspaceBaseUrl, submission: &WorklogSubmission) -> Result<()> {
        self.add_worklog(
            base_url.as_str(),
            &submission.ticket_key,
            &submission.time_spent,
        )
        .map_err(PanelError::from)
    }
}
