use serde::{Deserialize, Serialize};
use std::fmt;

/// Display-only grouping of a raw status name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusCategory {
    Todo,
    InProgress,
    Done,
    Other,
}

impl StatusCategory {
    /// CSS class used by the HTML renderer
    pub fn as_class(&self) -> &'static str {
        match self {
            StatusCategory::Todo => "todo",
            StatusCategory::InProgress => "in-progress",
            StatusCategory::Done => "done",
            StatusCategory::Other => "other",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_class())
    }
}

/// Classify a status name. Always yields a category; checks run in a fixed order.
pub fn classify_status(name: &str) -> StatusCategory {
    let normalized = name.to_lowercase().replace(' ', "-");

    if normalized.contains("to-do") || normalized.contains("todo") {
        StatusCategory::Todo
    } else if normalized.contains("in-progress") {
        StatusCategory::InProgress
    } else if normalized.contains("done") {
        StatusCategory::Done
    } else {
        StatusCategory::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_common_jira_statuses() {
        assert_eq!(classify_status("To Do"), StatusCategory::Todo);
        assert_eq!(classify_status("TODO"), StatusCategory::Todo);
        assert_eq!(classify_status("In Progress"), StatusCategory::InProgress);
        assert_eq!(classify_status("Done"), StatusCategory::Done);
        assert_eq!(classify_status("Blocked"), StatusCategory::Other);
        assert_eq!(classify_status(""), StatusCategory::Other);
    }

    #[test]
    fn matches_on_substrings() {
        assert_eq!(classify_status("Selected To Do"), StatusCategory::Todo);
        assert_eq!(classify_status("Review In Progress"), StatusCategory::InProgress);
        assert_eq!(classify_status("Done Done"), StatusCategory::Done);
    }

    #[test]
    fn earlier_check_wins() {
        // "to-do" is tested before "done"
        assert_eq!(classify_status("To Do (not done)"), StatusCategory::Todo);
        assert_eq!(classify_status("In Progress, almost done"), StatusCategory::InProgress);
    }

    #[test]
    fn multiple_spaces_are_each_replaced() {
        // "in  progress" becomes "in--progress" which no longer matches
        assert_eq!(classify_status("In  Progress"), StatusCategory::Other);
    }

    #[test]
    fn serializes_as_css_class() {
        let json = serde_json::to_string(&StatusCategory::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
