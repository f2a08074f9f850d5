use serde::{Deserialize, Serialize};

/// Jira issue as returned by the v2 search endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssue {
    /// Issue key (e.g., "PROJ-123")
    pub key: String,
    pub fields: JiraIssueFields,
}

/// Subset of issue fields the panel reads
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssueFields {
    /// Issue summary/title
    #[serde(default)]
    pub summary: String,
    pub status: JiraStatus,
    /// Issue type; carries the icon
    pub issuetype: Option<JiraIssueType>,
}

/// Issue status
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraStatus {
    /// Status name
    pub name: String,
}

/// Issue type
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssueType {
    /// Icon shown next to the key
    pub icon_url: Option<String>,
}

/// Search result response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSearchResult {
    /// Total number of results
    #[serde(default)]
    pub total: usize,
    /// Issues in this page
    #[serde(default)]
    pub issues: Vec<JiraIssue>,
}
