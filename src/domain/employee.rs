use crate::domain::identifiers::EmployeeId;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};

/// Employee role, controlling record visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "employee")]
    Employee,
    #[serde(rename = "manager")]
    Manager,
    #[serde(rename = "HR")]
    Hr,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Hr => "HR",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "HR" => Ok(Role::Hr),
            other => Err(Error::validation(
                "role",
                format!("Role must be employee, manager, or HR, got '{other}'"),
            )),
        }
    }

    /// HR and managers can see every employee's records
    pub fn can_view_all(&self) -> bool {
        matches!(self, Role::Hr | Role::Manager)
    }
}

/// Employee display name (trimmed, 2-255 characters)
#[nutype(
    sanitize(trim),
    validate(len_char_min = 2, len_char_max = 255),
    derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, Into)
)]
pub struct EmployeeName(String);

/// Employee email address (validated)
#[nutype(
    sanitize(trim, lowercase),
    validate(predicate = |email| email.contains('@') && email.len() > 3),
    derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, AsRef, Into)
)]
pub struct EmailAddress(String);

/// An employee row, without the password hash
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The caller identity injected by the authentication middleware
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: EmployeeId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Which rows this caller may read and write
    pub fn scope(&self) -> AccessScope {
        if self.role.can_view_all() {
            AccessScope::All
        } else {
            AccessScope::Own(self.id)
        }
    }
}

/// Row-level visibility for collection queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    All,
    Own(EmployeeId),
}

impl AccessScope {
    pub fn employee_id(&self) -> Option<EmployeeId> {
        match self {
            AccessScope::All => None,
            AccessScope::Own(id) => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_wire_names() {
        for role in [Role::Employee, Role::Manager, Role::Hr] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
        assert!(Role::parse("admin").is_err());
    }

    #[test]
    fn test_hr_and_manager_see_all_records() {
        assert!(Role::Hr.can_view_all());
        assert!(Role::Manager.can_view_all());
        assert!(!Role::Employee.can_view_all());
    }

    #[test]
    fn test_email_address_rejects_garbage() {
        assert!(EmailAddress::try_new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::try_new("a@b".to_string()).is_ok());
    }

    #[test]
    fn test_email_address_is_normalized() {
        let email = EmailAddress::try_new("  Casey@Example.COM ".to_string()).unwrap();
        assert_eq!(email.into_inner(), "casey@example.com");
    }

    #[test]
    fn test_employee_name_limits() {
        assert!(EmployeeName::try_new("A".to_string()).is_err());
        assert!(EmployeeName::try_new("Al".to_string()).is_ok());
        assert!(EmployeeName::try_new("x".repeat(256)).is_err());
    }

    #[test]
    fn test_employee_scope_follows_role() {
        let user = AuthenticatedUser {
            id: EmployeeId::new(7),
            name: "Casey".to_string(),
            email: "casey@example.com".to_string(),
            role: Role::Employee,
        };
        assert_eq!(user.scope(), AccessScope::Own(EmployeeId::new(7)));

        let manager = AuthenticatedUser {
            role: Role::Manager,
            ..user
        };
        assert_eq!(manager.scope(), AccessScope::All);
    }
}
