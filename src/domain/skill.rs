use crate::domain::identifiers::{EmployeeId, SkillId};
use chrono::{DateTime, NaiveDate, Utc};
use nutype::nutype;
use serde::Serialize;

/// Name of the skill being developed (trimmed, non-empty, at most 255 characters)
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 255),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Into)
)]
pub struct SkillName(String);

/// Description of the learning activity (at most 5000 characters)
#[nutype(
    sanitize(trim),
    validate(len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Into)
)]
pub struct LearningActivity(String);

/// Skill progress percentage, 0 through 100
#[nutype(
    validate(less_or_equal = 100),
    derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Into)
)]
pub struct Progress(u8);

impl Progress {
    /// Clamp an arbitrary integer into the valid range, matching the
    /// write-side behavior: out-of-range input is saturated, not rejected.
    pub fn clamped(value: i64) -> Self {
        let value = value.clamp(0, 100) as u8;
        Self::try_new(value).expect("clamped value is within range")
    }

    pub fn as_i32(&self) -> i32 {
        i32::from(self.into_inner())
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::clamped(0)
    }
}

/// A skill development entry, joined with the owning employee
#[derive(Debug, Clone, Serialize)]
pub struct SkillDevelopment {
    pub id: SkillId,
    pub employee_id: EmployeeId,
    pub skill_name: String,
    pub learning_activity: Option<String>,
    pub progress: u8,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub employee_name: String,
    pub employee_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps_out_of_range_values() {
        assert_eq!(Progress::clamped(-5).into_inner(), 0);
        assert_eq!(Progress::clamped(150).into_inner(), 100);
        assert_eq!(Progress::clamped(73).into_inner(), 73);
    }

    #[test]
    fn test_progress_rejects_values_over_100() {
        assert!(Progress::try_new(101).is_err());
        assert!(Progress::try_new(100).is_ok());
    }

    #[test]
    fn test_skill_name_limits() {
        assert!(SkillName::try_new("".to_string()).is_err());
        assert!(SkillName::try_new("x".repeat(256)).is_err());
        assert!(SkillName::try_new("Rust".to_string()).is_ok());
    }
}
