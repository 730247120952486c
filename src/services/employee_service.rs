//! Employee service - Directory actions.
//!
//! Mutations require an admin caller. Reads are open to any authenticated
//! caller.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::{hash_password, CurrentUser, DepartmentFilter, Employee, EmployeeRecord, NewEmployee};
use crate::errors::AppResult;
use crate::infra::EmployeeRepository;
use crate::types::StatCard;

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Add an employee with the configured default password (admin only)
    async fn add_employee(&self, actor: &CurrentUser, data: NewEmployee) -> AppResult<Employee>;

    /// Permanently remove an employee (admin only).
    /// Succeeds when the id is already gone.
    async fn delete_employee(&self, actor: &CurrentUser, id: &str) -> AppResult<()>;

    /// List employees by department, ordered by name.
    /// `None` or `"All"` lists everyone.
    async fn employees_by_department(&self, department: Option<&str>) -> AppResult<Vec<Employee>>;

    /// Total number of employees
    async fn total_employees(&self) -> AppResult<u64>;

    /// Headline numbers for the dashboard
    async fn dashboard_stats(&self) -> AppResult<Vec<StatCard>>;
}

/// Concrete implementation of EmployeeService.
pub struct EmployeeManager {
    employees: Arc<dyn EmployeeRepository>,
    default_password: String,
}

impl EmployeeManager {
    pub fn new(employees: Arc<dyn EmployeeRepository>, default_password: impl Into<String>) -> Self {
        Self {
            employees,
            default_password: default_password.into(),
        }
    }
}

#[async_trait]
impl EmployeeService for EmployeeManager {
    async fn add_employee(&self, actor: &CurrentUser, data: NewEmployee) -> AppResult<Employee> {
        actor.require_admin()?;

        let password_hash = hash_password(&self.default_password).await?;
        let record = EmployeeRecord::new(data, password_hash.into_string(), Utc::now());
        let employee = self.employees.create(record).await?;

        tracing::info!(employee_id = %employee.id, added_by = %actor.id, "Employee added");
        Ok(employee)
    }

    async fn delete_employee(&self, actor: &CurrentUser, id: &str) -> AppResult<()> {
        actor.require_admin()?;

        self.employees.delete(id).await?;

        tracing::info!(employee_id = id, deleted_by = %actor.id, "Employee deleted");
        Ok(())
    }

    async fn employees_by_department(&self, department: Option<&str>) -> AppResult<Vec<Employee>> {
        self.employees
            .list(DepartmentFilter::from_query(department))
            .await
    }

    async fn total_employees(&self) -> AppResult<u64> {
        self.employees.count().await
    }

    async fn dashboard_stats(&self) -> AppResult<Vec<StatCard>> {
        let (total, everyone) = tokio::try_join!(
            self.employees.count(),
            self.employees.list(DepartmentFilter::All),
        )?;

        let departments: BTreeSet<&str> = everyone.iter().map(|e| e.department.as_str()).collect();

        Ok(vec![
            StatCard::new("Total Employees", total),
            StatCard::new("Departments", departments.len() as u64)
                .with_description("Distinct departments with at least one employee"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::verify_password;
    use crate::errors::AppError;
    use crate::infra::MockEmployeeRepository;
    use crate::types::StatValue;

    fn admin() -> CurrentUser {
        CurrentUser {
            id: "usr_admin".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    fn staff() -> CurrentUser {
        CurrentUser {
            id: "usr_staff".to_string(),
            email: "staff@example.com".to_string(),
            role: "employee".to_string(),
        }
    }

    fn new_employee() -> NewEmployee {
        NewEmployee {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            department: "Engineering".to_string(),
            title: "Analyst".to_string(),
            role: "employee".to_string(),
        }
    }

    fn employee(name: &str, department: &str) -> Employee {
        let now = Utc::now();
        Employee {
            id: format!("usr_{}", name.len()),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            department: department.to_string(),
            title: "Staff".to_string(),
            role: "employee".to_string(),
            password_hash: "hash".to_string(),
            created_at: now,
            updated_at: now,
            password_last_changed: now,
        }
    }

    fn record_to_employee(record: EmployeeRecord) -> Employee {
        Employee {
            id: record.id,
            name: record.name,
            email: record.email,
            department: record.department,
            title: record.title,
            role: record.role,
            password_hash: record.password_hash,
            created_at: record.created_at,
            updated_at: record.created_at,
            password_last_changed: record.created_at,
        }
    }

    #[tokio::test]
    async fn test_add_employee_hashes_default_password() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|record| Ok(record_to_employee(record)));

        let service = EmployeeManager::new(Arc::new(repo), "Welcome1!");
        let employee = service.add_employee(&admin(), new_employee()).await.unwrap();

        assert!(employee.id.starts_with("usr_"));
        assert_eq!(employee.department, "Engineering");
        assert_ne!(employee.password_hash, "Welcome1!");
        assert!(verify_password("Welcome1!", &employee.password_hash).await);
        assert_eq!(employee.created_at, employee.password_last_changed);
    }

    #[tokio::test]
    async fn test_add_employee_with_empty_default_password() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_create()
            .returning(|record| Ok(record_to_employee(record)));

        let service = EmployeeManager::new(Arc::new(repo), "");
        let employee = service.add_employee(&admin(), new_employee()).await.unwrap();

        assert!(verify_password("", &employee.password_hash).await);
    }

    #[tokio::test]
    async fn test_add_employee_requires_admin() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_create().never();

        let service = EmployeeManager::new(Arc::new(repo), "Welcome1!");
        let result = service.add_employee(&staff(), new_employee()).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_add_employee_propagates_conflict() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_create()
            .returning(|_| Err(AppError::conflict("Employee")));

        let service = EmployeeManager::new(Arc::new(repo), "Welcome1!");
        let result = service.add_employee(&admin(), new_employee()).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete_employee() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete()
            .with(eq("usr_42"))
            .times(1)
            .returning(|_| Ok(()));

        let service = EmployeeManager::new(Arc::new(repo), "");
        assert!(service.delete_employee(&admin(), "usr_42").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_employee_requires_admin() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete().never();

        let service = EmployeeManager::new(Arc::new(repo), "");
        let result = service.delete_employee(&staff(), "usr_42").await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_missing_employee_succeeds() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete()
            .with(eq("usr_404"))
            .times(1)
            .returning(|_| Ok(()));

        let service = EmployeeManager::new(Arc::new(repo), "");
        assert!(service.delete_employee(&admin(), "usr_404").await.is_ok());
    }

    #[tokio::test]
    async fn test_all_department_lists_everyone() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_list()
            .with(eq(DepartmentFilter::All))
            .times(3)
            .returning(|_| Ok(vec![employee("Ada", "Engineering"), employee("Bob", "Sales")]));

        let service = EmployeeManager::new(Arc::new(repo), "");

        assert_eq!(service.employees_by_department(None).await.unwrap().len(), 2);
        assert_eq!(service.employees_by_department(Some("All")).await.unwrap().len(), 2);
        assert_eq!(service.employees_by_department(Some("")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_department() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_list()
            .with(eq(DepartmentFilter::Only("Sales".to_string())))
            .returning(|_| Ok(vec![employee("Bob", "Sales")]));

        let service = EmployeeManager::new(Arc::new(repo), "");
        let employees = service.employees_by_department(Some("Sales")).await.unwrap();

        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].department, "Sales");
    }

    #[tokio::test]
    async fn test_total_employees() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_count().returning(|| Ok(7));

        let service = EmployeeManager::new(Arc::new(repo), "");
        assert_eq!(service.total_employees().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_count().returning(|| Ok(3));
        repo.expect_list().returning(|_| {
            Ok(vec![
                employee("Ada", "Engineering"),
                employee("Bob", "Sales"),
                employee("Cyd", "Engineering"),
            ])
        });

        let service = EmployeeManager::new(Arc::new(repo), "");
        let cards = service.dashboard_stats().await.unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Total Employees");
        assert_eq!(cards[0].value, StatValue::Number(3));
        assert!(cards[0].description.is_none());
        assert_eq!(cards[1].title, "Departments");
        assert_eq!(cards[1].value, StatValue::Number(2));
    }
}
