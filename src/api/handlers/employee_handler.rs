//! Employee directory handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::ROLE_EMPLOYEE;
use crate::domain::{CurrentUser, EmployeeResponse, NewEmployee};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, StatCard};

/// New employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Department is required"))]
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Staff Engineer")]
    pub title: String,
    /// Defaults to "employee"
    #[schema(example = "employee")]
    pub role: Option<String>,
}

impl From<CreateEmployeeRequest> for NewEmployee {
    fn from(request: CreateEmployeeRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            department: request.department,
            title: request.title,
            role: request.role.unwrap_or_else(|| ROLE_EMPLOYEE.to_string()),
        }
    }
}

/// Department filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DepartmentQuery {
    /// Department name, or "All"
    #[param(example = "Engineering")]
    pub department: Option<String>,
}

/// Employee count
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeCount {
    #[schema(example = 42)]
    pub total: u64,
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/count", get(count_employees))
        .route("/stats", get(dashboard_stats))
        .route("/:id", delete(delete_employee))
}

/// List employees, optionally by department
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(DepartmentQuery),
    responses(
        (status = 200, description = "Employees ordered by name", body = Vec<EmployeeResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_employees(
    State(state): State<AppState>,
    Query(query): Query<DepartmentQuery>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    let employees = state
        .employee_service
        .employees_by_department(query.department.as_deref())
        .await?;

    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

/// Add an employee (admin only)
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee added", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<Created<EmployeeResponse>> {
    let employee = state
        .employee_service
        .add_employee(&current_user, payload.into())
        .await?;

    Ok(Created(EmployeeResponse::from(employee)))
}

/// Permanently remove an employee (admin only)
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted, or already absent"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn delete_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NoContent> {
    state
        .employee_service
        .delete_employee(&current_user, &id)
        .await?;

    Ok(NoContent)
}

/// Total number of employees
#[utoipa::path(
    get,
    path = "/employees/count",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employee count", body = EmployeeCount),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn count_employees(State(state): State<AppState>) -> AppResult<Json<EmployeeCount>> {
    let total = state.employee_service.total_employees().await?;
    Ok(Json(EmployeeCount { total }))
}

/// Dashboard stat cards
#[utoipa::path(
    get,
    path = "/employees/stats",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stat cards", body = Vec<StatCard>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn dashboard_stats(State(state): State<AppState>) -> AppResult<Json<Vec<StatCard>>> {
    let cards = state.employee_service.dashboard_stats().await?;
    Ok(Json(cards))
}
