//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{
    calculate_password_strength, CurrentUser, PasswordPolicy, PasswordStrength, PASSWORD_POLICY,
};
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Employee login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Employee email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Employee password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Password to score
#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordRequest {
    #[schema(example = "Abcdefg1!")]
    pub password: String,
}

/// Password change request. The new password is scored, not rejected.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[schema(example = "NewPass1!")]
    pub new_password: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/password/strength", post(evaluate_password))
        .route("/password/policy", get(password_policy))
}

/// Authentication routes that need a signed-in employee
pub fn account_routes() -> Router<AppState> {
    Router::new().route("/password", put(change_password))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Score a password against the policy
#[utoipa::path(
    post,
    path = "/auth/password/strength",
    tag = "Authentication",
    request_body = PasswordRequest,
    responses(
        (status = 200, description = "Strength evaluation", body = PasswordStrength)
    )
)]
pub async fn evaluate_password(Json(payload): Json<PasswordRequest>) -> Json<PasswordStrength> {
    Json(calculate_password_strength(&payload.password))
}

/// Current password policy
#[utoipa::path(
    get,
    path = "/auth/password/policy",
    tag = "Authentication",
    responses(
        (status = 200, description = "Password policy", body = PasswordPolicy)
    )
)]
pub async fn password_policy() -> Json<PasswordPolicy> {
    Json(PASSWORD_POLICY)
}

/// Change the signed-in employee's password
#[utoipa::path(
    put,
    path = "/auth/password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed, strength of the new password", body = PasswordStrength),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized or wrong current password")
    )
)]
pub async fn change_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<PasswordStrength>> {
    let strength = state
        .auth_service
        .change_password(&current_user.id, payload.current_password, payload.new_password)
        .await?;

    Ok(Json(strength))
}
