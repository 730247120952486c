//! Service Container - Centralized service access.
//!
//! Wires repositories into services once at startup and hands out shared
//! trait objects.

use std::sync::Arc;

use super::{AuthService, Authenticator, EmployeeManager, EmployeeService};
use crate::config::Config;
use crate::infra::{EmployeeRepository, EmployeeStore};

/// Every application service, built on one shared repository.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    employee_service: Arc<dyn EmployeeService>,
}

impl Services {
    /// Build every service on top of one shared repository.
    pub fn from_repository(employees: Arc<dyn EmployeeRepository>, config: Config) -> Self {
        let default_password = config.default_password().to_string();

        Self {
            auth_service: Arc::new(Authenticator::new(employees.clone(), config)),
            employee_service: Arc::new(EmployeeManager::new(employees, default_password)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_repository(Arc::new(EmployeeStore::new(db)), config)
    }

    /// Get authentication service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get employee directory service
    pub fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }
}
