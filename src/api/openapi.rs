//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, employee_handler};
use crate::domain::{EmployeeResponse, PasswordPolicy, PasswordRequirements, PasswordStrength};
use crate::services::TokenResponse;
use crate::types::StatCard;

/// OpenAPI documentation for the employee directory
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Directory",
        version = "0.1.0",
        description = "Employee directory with password strength scoring and bcrypt credentials",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::evaluate_password,
        auth_handler::password_policy,
        auth_handler::change_password,
        // Employee endpoints
        employee_handler::list_employees,
        employee_handler::create_employee,
        employee_handler::delete_employee,
        employee_handler::count_employees,
        employee_handler::dashboard_stats,
    ),
    components(
        schemas(
            EmployeeResponse,
            PasswordPolicy,
            PasswordRequirements,
            PasswordStrength,
            StatCard,
            TokenResponse,
            auth_handler::LoginRequest,
            auth_handler::PasswordRequest,
            auth_handler::ChangePasswordRequest,
            employee_handler::CreateEmployeeRequest,
            employee_handler::EmployeeCount,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and password management"),
        (name = "Employees", description = "Employee directory")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
