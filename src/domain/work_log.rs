use crate::domain::identifiers::{EmployeeId, WorkLogId};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};

/// Work log status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkLogStatus {
    Planned,
    InProgress,
    Completed,
}

impl WorkLogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkLogStatus::Planned => "planned",
            WorkLogStatus::InProgress => "in-progress",
            WorkLogStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "planned" => Ok(WorkLogStatus::Planned),
            "in-progress" => Ok(WorkLogStatus::InProgress),
            "completed" => Ok(WorkLogStatus::Completed),
            other => Err(Error::validation(
                "status",
                format!("Status must be planned, in-progress, or completed, got '{other}'"),
            )),
        }
    }
}

impl Default for WorkLogStatus {
    fn default() -> Self {
        WorkLogStatus::Planned
    }
}

/// What the employee worked on (trimmed, non-empty, at most 5000 characters)
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Into)
)]
pub struct TaskDescription(String);

/// Free-form comments on a work log (at most 2000 characters)
#[nutype(
    sanitize(trim),
    validate(len_char_max = 2000),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Into)
)]
pub struct CommentText(String);

/// A daily work log entry, joined with the owning employee
#[derive(Debug, Clone, Serialize)]
pub struct WorkLog {
    pub id: WorkLogId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub task_description: String,
    pub status: WorkLogStatus,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(WorkLogStatus::InProgress.as_str(), "in-progress");
        assert_eq!(
            WorkLogStatus::parse("in-progress").unwrap(),
            WorkLogStatus::InProgress
        );
        assert!(WorkLogStatus::parse("done").is_err());
    }

    #[test]
    fn test_status_defaults_to_planned() {
        assert_eq!(WorkLogStatus::default(), WorkLogStatus::Planned);
    }

    #[test]
    fn test_task_description_rejects_empty_and_oversized() {
        assert!(TaskDescription::try_new("   ".to_string()).is_err());
        assert!(TaskDescription::try_new("x".repeat(5001)).is_err());
        assert!(TaskDescription::try_new("Shipped the Q3 report".to_string()).is_ok());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&WorkLogStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }
}
