use nutype::nutype;

/// Unique identifier for an employee
#[nutype(derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into
))]
pub struct EmployeeId(i64);

/// Unique identifier for a daily work log entry
#[nutype(derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into
))]
pub struct WorkLogId(i64);

/// Unique identifier for a skill development entry
#[nutype(derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into
))]
pub struct SkillId(i64);

/// Unique identifier for a mood feedback entry
#[nutype(derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into
))]
pub struct MoodId(i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_round_trips_through_inner_value() {
        let id = EmployeeId::new(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(id, EmployeeId::from(42));
    }
}
