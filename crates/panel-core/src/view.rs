use serde::Serialize;

use crate::models::{Ticket, WorkspaceBaseUrl};
use crate::status::StatusCategory;

pub const NO_TICKETS: &str = "No unresolved tickets assigned to you.";
pub const VIEW_ALL_LABEL: &str = "View all unresolved tickets in Jira";

/// Whole panel content, replaced on every render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    /// Workspace the rows link into; None when resolution failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<WorkspaceBaseUrl>,
    pub content: PanelContent,
    /// Link to the full list in Jira when the page was truncated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_all: Option<ViewAllLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PanelContent {
    /// Informational sentence (e.g. nothing assigned)
    Notice { message: String },
    /// Failure sentence
    Error { message: String },
    Table { rows: Vec<TicketRow> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewAllLink {
    pub label: String,
    pub url: String,
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRow {
    pub key: String,
    pub browse_url: String,
    pub icon_url: Option<String>,
    /// Raw summary; renderers escape it
    pub summary: String,
    pub status_name: String,
    pub status_class: StatusCategory,
    /// Element id of the row's feedback area
    pub feedback_slot: String,
}

impl PanelView {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            base_url: None,
            content: PanelContent::Error {
                message: message.into(),
            },
            view_all: None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.content, PanelContent::Error { .. })
    }

    pub fn rows(&self) -> &[TicketRow] {
        match &self.content {
            PanelContent::Table { rows } => rows,
            _ => &[],
        }
    }

    /// Attach the "view all" link pointing at this view's workspace
    pub fn with_view_all(mut self) -> Self {
        if let Some(base_url) = &self.base_url {
            self.view_all = Some(ViewAllLink {
                label: VIEW_ALL_LABEL.to_string(),
                url: base_url.view_all_url(),
            });
        }
        self
    }
}

/// Build the row view-models for a ticket list
pub fn render_tickets(tickets: &[Ticket], base_url: &WorkspaceBaseUrl) -> PanelView {
    let content = if tickets.is_empty() {
        PanelContent::Notice {
            message: NO_TICKETS.to_string(),
        }
    } else {
        PanelContent::Table {
            rows: tickets.iter().map(|t| ticket_row(t, base_url)).collect(),
        }
    };

    PanelView {
        base_url: Some(base_url.clone()),
        content,
        view_all: None,
    }
}

fn ticket_row(ticket: &Ticket, base_url: &WorkspaceBaseUrl) -> TicketRow {
    TicketRow {
        key: ticket.key.clone(),
        browse_url: base_url.browse_url(&ticket.key),
        icon_url: ticket.icon_url.clone(),
        summary: ticket.summary.clone(),
        status_name: ticket.status.name.clone(),
        status_class: ticket.status.category,
        feedback_slot: feedback_slot(&ticket.key),
    }
}

pub fn feedback_slot(key: &str) -> String {
    format!("feedback-{}", key)
}
