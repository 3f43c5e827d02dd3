use crate::domain::identifiers::{EmployeeId, MoodId};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};

/// How the employee felt that day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Stressed,
    Tired,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Stressed => "stressed",
            Mood::Tired => "tired",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "stressed" => Ok(Mood::Stressed),
            "tired" => Ok(Mood::Tired),
            other => Err(Error::validation(
                "mood",
                format!("Mood must be happy, neutral, stressed, or tired, got '{other}'"),
            )),
        }
    }
}

/// Optional free-form feedback (at most 2000 characters)
#[nutype(
    sanitize(trim),
    validate(len_char_max = 2000),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Into)
)]
pub struct FeedbackText(String);

/// A mood feedback entry, joined with the owning employee
#[derive(Debug, Clone, Serialize)]
pub struct MoodFeedback {
    pub id: MoodId,
    pub employee_id: EmployeeId,
    pub mood: Mood,
    pub feedback: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_wire_names() {
        for mood in [Mood::Happy, Mood::Neutral, Mood::Stressed, Mood::Tired] {
            assert_eq!(Mood::parse(mood.as_str()).unwrap(), mood);
        }
        assert!(Mood::parse("ecstatic").is_err());
    }

    #[test]
    fn test_mood_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Stressed).unwrap(), "\"stressed\"");
    }

    #[test]
    fn test_feedback_length_limit() {
        assert!(FeedbackText::try_new("x".repeat(2001)).is_err());
        assert!(FeedbackText::try_new("Good sprint".to_string()).is_ok());
    }
}
