//! Employee repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use crate::domain::{DepartmentFilter, Employee, EmployeeRecord};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Employee repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find employee by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Employee>>;

    /// Find employee by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>>;

    /// Insert a new employee
    async fn create(&self, record: EmployeeRecord) -> AppResult<Employee>;

    /// Permanently delete an employee. Deleting an unknown id is a no-op.
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// List employees matching the filter, ordered by name
    async fn list(&self, filter: DepartmentFilter) -> AppResult<Vec<Employee>>;

    /// Count all employees
    async fn count(&self) -> AppResult<u64>;

    /// Store a new password hash and restart the expiration window
    async fn update_password(&self, id: &str, password_hash: String) -> AppResult<Employee>;
}

/// Concrete implementation of EmployeeRepository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Employee"),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn create(&self, record: EmployeeRecord) -> AppResult<Employee> {
        let active_model = ActiveModel {
            id: Set(record.id),
            name: Set(record.name),
            email: Set(record.email),
            department: Set(record.department),
            title: Set(record.title),
            role: Set(record.role),
            password_hash: Set(record.password_hash),
            created_at: Set(record.created_at),
            updated_at: Set(record.created_at),
            password_last_changed: Set(record.created_at),
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(Employee::from(model))
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = EmployeeEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            tracing::debug!(employee_id = id, "Delete matched no employee");
        }

        Ok(())
    }

    async fn list(&self, filter: DepartmentFilter) -> AppResult<Vec<Employee>> {
        let mut query = EmployeeEntity::find();
        if let DepartmentFilter::Only(department) = filter {
            query = query.filter(employee::Column::Department.eq(department));
        }

        let models = query
            .order_by_asc(employee::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        EmployeeEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn update_password(&self, id: &str, password_hash: String) -> AppResult<Employee> {
        let employee = EmployeeEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = employee.into();
        let now = Utc::now();
        active.password_hash = Set(password_hash);
        active.password_last_changed = Set(now);
        active.updated_at = Set(now);

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Employee::from(model))
    }
}
