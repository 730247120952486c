//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, EmployeeService, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Employee directory service
    pub employee_service: Arc<dyn EmployeeService>,
    /// Database connection, absent when services are injected by hand
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            employee_service: container.employees(),
            database: Some(database),
        }
    }

    /// Create application state with manually injected services.
    ///
    /// The health endpoint reports the database as unconfigured.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        employee_service: Arc<dyn EmployeeService>,
    ) -> Self {
        Self {
            auth_service,
            employee_service,
            database: None,
        }
    }
}
