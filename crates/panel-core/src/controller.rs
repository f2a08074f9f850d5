//! Ticket panel controller
//!
//! Turns the resolver reply into a workspace, loads the assigned tickets into a
//! [`PanelView`], and submits worklogs. Every failure ends up as a sentence in
//! the view or in a row's [`Feedback`]; nothing here returns an error.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::PanelError;
use crate::models::{Feedback, WorklogSubmission, WorkspaceBaseUrl};
use crate::resolver::ResolverResponse;
use crate::traits::TicketSource;
use crate::view::{render_tickets, PanelView};

/// Tickets requested per search
pub const PAGE_SIZE: usize = 15;

/// JQL for the panel: open tickets assigned to the caller, newest activity first
pub const ASSIGNED_JQL: &str =
    "assignee=currentUser() AND resolution=Unresolved ORDER BY updated DESC";

pub const NO_RESOLVER_REPLY: &str = "Error: No response from workspace resolver.";
pub const UNEXPECTED_REPLY: &str = "Error: Unexpected response format.";
pub const CONNECT_FAILED: &str = "Error: Unable to connect to Jira API.";
pub const EMPTY_TIME: &str = "Please enter a time value.";
pub const TIME_ADDED: &str = "Time added successfully.";
pub const WORKLOG_CONNECT_FAILED: &str = "Failed to connect to Jira API.";

/// Result of interpreting the resolver reply
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    Ready(WorkspaceBaseUrl),
    /// Resolution failed; the view holds the message to show
    Halted(PanelView),
}

/// Interpret the resolver's reply (None when no reply arrived)
pub fn init_from_reply(reply: Option<ResolverResponse>) -> InitOutcome {
    let Some(reply) = reply else {
        return InitOutcome::Halted(PanelView::error(NO_RESOLVER_REPLY));
    };

    if let Some(error) = reply.error {
        return InitOutcome::Halted(PanelView::error(error));
    }

    match reply.base_url {
        Some(url) => match WorkspaceBaseUrl::parse(&url) {
            Ok(base_url) => InitOutcome::Ready(base_url),
            Err(e) => {
                warn!("resolver returned an unusable base URL: {}", e);
                InitOutcome::Halted(PanelView::error(UNEXPECTED_REPLY))
            }
        },
        None => InitOutcome::Halted(PanelView::error(UNEXPECTED_REPLY)),
    }
}

/// Fetch and render the user's unresolved tickets
pub fn fetch_assigned_tickets(source: &dyn TicketSource, base_url: &WorkspaceBaseUrl) -> PanelView {
    match source.search_assigned(base_url, PAGE_SIZE) {
        Ok(page) => {
            debug!(count = page.tickets.len(), total = page.total, "fetched tickets");
            let view = render_tickets(&page.tickets, base_url);
            if page.total > PAGE_SIZE {
                view.with_view_all()
            } else {
                view
            }
        }
        Err(e) => {
            warn!("ticket search failed: {}", e);
            let message = match e.status() {
                Some(status) => format!("Error: {} - Unable to fetch tickets.", status),
                None => CONNECT_FAILED.to_string(),
            };
            let mut view = PanelView::error(message);
            view.base_url = Some(base_url.clone());
            view
        }
    }
}

/// Resolve the workspace from the reply and load the panel
pub fn load_panel(reply: Option<ResolverResponse>, source: &dyn TicketSource) -> PanelView {
    match init_from_reply(reply) {
        InitOutcome::Ready(base_url) => fetch_assigned_tickets(source, &base_url),
        InitOutcome::Halted(view) => view,
    }
}

/// Submit a time entry for one ticket. Blank input never reaches the source.
pub fn submit_worklog(
    source: &dyn TicketSource,
    base_url: &WorkspaceBaseUrl,
    ticket_key: &str,
    input: &str,
) -> Feedback {
    let time_spent = input.trim();
    if time_spent.is_empty() {
        return Feedback::error(EMPTY_TIME);
    }

    let submission = WorklogSubmission {
        ticket_key: ticket_key.to_string(),
        time_spent: time_spent.to_string(),
    };

    match source.add_worklog(base_url, &submission) {
        Ok(()) => Feedback::success(TIME_ADDED),
        Err(e) => worklog_failure(ticket_key, &e),
    }
}

fn worklog_failure(ticket_key: &str, err: &PanelError) -> Feedback {
    warn!(ticket = ticket_key, "worklog submission failed: {}", err);
    match err.status() {
        Some(status) => Feedback::error(format!("Error: {} - Unable to add time.", status)),
        None => Feedback::error(WORKLOG_CONNECT_FAILED),
    }
}

/// Input and feedback state of one row's time entry control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowEntry {
    pub input: String,
    pub feedback: Option<Feedback>,
}

/// Time entry controls of a rendered table, dispatched by ticket key
///
/// Built once per render; rows are looked up by key rather than bound one by one.
#[derive(Debug, Clone)]
pub struct WorklogRegistry {
    base_url: WorkspaceBaseUrl,
    entries: HashMap<String, RowEntry>,
}

impl WorklogRegistry {
    /// Registry for a table view; None when the view has no rows
    pub fn from_view(view: &PanelView) -> Option<Self> {
        let base_url = view.base_url.clone()?;
        let rows = view.rows();
        if rows.is_empty() {
            return None;
        }

        let entries = rows
            .iter()
            .map(|row| (row.key.clone(), RowEntry::default()))
            .collect();

        Some(Self { base_url, entries })
    }

    pub fn entry(&self, key: &str) -> Option<&RowEntry> {
        self.entries.get(key)
    }

    /// Type into a row's input. Returns false for unknown keys.
    pub fn set_input(&mut self, key: &str, value: impl Into<String>) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.input = value.into();
                true
            }
            None => false,
        }
    }

    /// Press a row's submit control
    pub fn submit(&mut self, source: &dyn TicketSource, key: &str) -> Feedback {
        let Some(entry) = self.entries.get_mut(key) else {
            return Feedback::error(format!("Error: Unknown ticket {}.", key));
        };

        let feedback = submit_worklog(source, &self.base_url, key, &entry.input);
        if feedback.is_success() {
            entry.input.clear();
        }
        entry.feedback = Some(feedback.clone());
        feedback
    }

    /// Fill a row's input and submit it in one step
    pub fn dispatch(&mut self, source: &dyn TicketSource, key: &str, value: &str) -> Feedback {
        if !self.set_input(key, value) {
            return Feedback::error(format!("Error: Unknown ticket {}.", key));
        }
        self.submit(source, key)
    }
}
