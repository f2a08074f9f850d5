use serde::Serialize;

/// Request body for adding a worklog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJiraWorklog {
    /// Duration in Jira notation, e.g. "1h 30m"; not validated client-side
    pub time_spent: String,
}
