//! Employee domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ALL_DEPARTMENTS, EMPLOYEE_ID_PREFIX, ROLE_ADMIN};
use crate::domain::password::is_password_expired;
use crate::errors::{AppError, AppResult};

/// Employee domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub title: String,
    pub role: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub password_last_changed: DateTime<Utc>,
}

impl Employee {
    /// Generate an identifier from the creation instant.
    pub fn generate_id(at: DateTime<Utc>) -> String {
        format!("{}{}", EMPLOYEE_ID_PREFIX, at.timestamp_millis())
    }

    /// Check if employee has admin role
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Whether the employee's password is past its expiration window
    pub fn password_expired(&self) -> bool {
        is_password_expired(self.password_last_changed)
    }
}

/// Employee creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewEmployee {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Staff Engineer")]
    pub title: String,
    #[schema(example = "employee")]
    pub role: String,
}

/// Record handed to the repository when an employee is inserted
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub title: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl EmployeeRecord {
    /// Build a record for a new employee; every timestamp is `now`.
    pub fn new(data: NewEmployee, password_hash: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Employee::generate_id(now),
            name: data.name,
            email: data.email,
            department: data.department,
            title: data.title,
            role: data.role,
            password_hash,
            created_at: now,
        }
    }
}

/// Department filter for directory listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentFilter {
    All,
    Only(String),
}

impl DepartmentFilter {
    /// `None`, an empty string and `"All"` all mean every department.
    pub fn from_query(department: Option<&str>) -> Self {
        match department {
            None => Self::All,
            Some(d) if d.is_empty() || d == ALL_DEPARTMENTS => Self::All,
            Some(d) => Self::Only(d.to_string()),
        }
    }
}

/// Authenticated caller extracted from a JWT
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl CurrentUser {
    /// Check if user has admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Require admin role, returns Forbidden error if not admin.
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Employee response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    #[schema(example = "usr_1718452800000")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Staff Engineer")]
    pub title: String,
    #[schema(example = "employee")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub password_last_changed: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            department: employee.department,
            title: employee.title,
            role: employee.role,
            created_at: employee.created_at,
            password_last_changed: employee.password_last_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn sample(role: &str) -> Employee {
        let now = Utc::now();
        Employee {
            id: "usr_1".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            department: "Engineering".to_string(),
            title: "Rear Admiral".to_string(),
            role: role.to_string(),
            password_hash: "$2b$12$hash".to_string(),
            created_at: now,
            updated_at: now,
            password_last_changed: now,
        }
    }

    #[test]
    fn test_generate_id_uses_millis() {
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(Employee::generate_id(at), "usr_1718452800000");
    }

    #[test]
    fn test_admin_role_is_exact() {
        assert!(sample("admin").is_admin());
        assert!(!sample("Admin").is_admin());
        assert!(!sample("employee").is_admin());
    }

    #[test]
    fn test_require_admin() {
        let admin = CurrentUser {
            id: "usr_1".to_string(),
            email: "root@example.com".to_string(),
            role: "admin".to_string(),
        };
        let staff = CurrentUser {
            role: "employee".to_string(),
            ..admin.clone()
        };

        assert!(admin.require_admin().is_ok());
        assert!(matches!(staff.require_admin(), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_password_expired() {
        let mut employee = sample("employee");
        assert!(!employee.password_expired());

        employee.password_last_changed = Utc::now() - Duration::days(20);
        assert!(employee.password_expired());
    }

    #[test]
    fn test_department_filter() {
        assert_eq!(DepartmentFilter::from_query(None), DepartmentFilter::All);
        assert_eq!(DepartmentFilter::from_query(Some("")), DepartmentFilter::All);
        assert_eq!(DepartmentFilter::from_query(Some("All")), DepartmentFilter::All);
        assert_eq!(
            DepartmentFilter::from_query(Some("all")),
            DepartmentFilter::Only("all".to_string())
        );
        assert_eq!(
            DepartmentFilter::from_query(Some("Sales")),
            DepartmentFilter::Only("Sales".to_string())
        );
    }

    #[test]
    fn test_record_stamps_id_from_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = EmployeeRecord::new(
            NewEmployee {
                name: "Linus".to_string(),
                email: "linus@example.com".to_string(),
                department: "Kernel".to_string(),
                title: "Maintainer".to_string(),
                role: "employee".to_string(),
            },
            "hash".to_string(),
            now,
        );

        assert_eq!(record.id, format!("usr_{}", now.timestamp_millis()));
        assert_eq!(record.created_at, now);
    }

    #[test]
    fn test_response_hides_password_hash() {
        let json = serde_json::to_value(EmployeeResponse::from(sample("employee"))).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["department"], "Engineering");
    }
}
