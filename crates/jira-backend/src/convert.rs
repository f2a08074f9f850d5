//! Model conversions from Jira types to panel-core types

use panel_core::{Ticket, TicketPage, TicketStatus};

use crate::models::*;

impl From<JiraIssue> for Ticket {
    fn from(j: JiraIssue) -> Self {
        Ticket {
            key: j.key,
            summary: j.fields.summary,
            status: TicketStatus::new(j.fields.status.name),
            icon_url: j.fields.issuetype.and_then(|t| t.icon_url),
        }
    }
}

impl From<JiraSearchResult> for TicketPage {
    fn from(r: JiraSearchResult) -> Self {
        TicketPage {
            tickets: r.issues.into_iter().map(Into::into).collect(),
            total: r.total,
        }
    }
}
