//! Authentication service - Login, token verification and password changes.
//!
//! Password hashing and scoring live in `domain::password`; this service
//! decides when to call them.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{
    calculate_password_strength, hash_password, verify_password, Employee, PasswordStrength,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::EmployeeRepository;

/// Well-formed bcrypt hash that matches no password. Verified against when
/// the email is unknown so both paths pay the same bcrypt cost.
const DUMMY_HASH: &str = "$2b$12$C6UzMDM.H6dfI/f/IKxGhuE0dnGuX3J5vvJ1Ztm5Yw7HYc3u3xuA2";

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    /// Whether the password is past its expiration window
    pub password_expired: bool,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Replace an employee's password after checking the current one.
    ///
    /// Returns the strength of the new password. Weak passwords are
    /// reported, not rejected.
    async fn change_password(
        &self,
        employee_id: &str,
        current_password: String,
        new_password: String,
    ) -> AppResult<PasswordStrength>;
}

fn generate_token(employee: &Employee, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: employee.id.clone(),
        email: employee.email.clone(),
        role: employee.role.clone(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
        password_expired: employee.password_expired(),
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    employees: Arc<dyn EmployeeRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(employees: Arc<dyn EmployeeRepository>, config: Config) -> Self {
        Self { employees, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let employee = self.employees.find_by_email(&email).await?;

        let stored_hash = employee
            .as_ref()
            .map(|e| e.password_hash.as_str())
            .unwrap_or(DUMMY_HASH);
        let password_valid = verify_password(&password, stored_hash).await;

        match employee {
            Some(employee) if password_valid => {
                let token = generate_token(&employee, &self.config)?;
                if token.password_expired {
                    tracing::info!(employee_id = %employee.id, "Login with expired password");
                }
                Ok(token)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn change_password(
        &self,
        employee_id: &str,
        current_password: String,
        new_password: String,
    ) -> AppResult<PasswordStrength> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or_not_found()?;

        if !verify_password(&current_password, &employee.password_hash).await {
            return Err(AppError::InvalidCredentials);
        }

        let strength = calculate_password_strength(&new_password);
        let new_hash = hash_password(&new_password).await?;
        self.employees
            .update_password(employee_id, new_hash.into_string())
            .await?;

        tracing::info!(employee_id, score = strength.score, "Password changed");
        Ok(strength)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::MockEmployeeRepository;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn config() -> Config {
        Config::new("postgres://unused", SECRET, "")
    }

    fn employee_with_hash(hash: String) -> Employee {
        let now = Utc::now();
        Employee {
            id: "usr_1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            department: "Engineering".to_string(),
            title: "Engineer".to_string(),
            role: "admin".to_string(),
            password_hash: hash,
            created_at: now,
            updated_at: now,
            password_last_changed: now,
        }
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let hash = hash_password("Abcdefg1!").await.unwrap().into_string();
        let employee = employee_with_hash(hash);

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .with(eq("ada@example.com"))
            .returning(move |_| Ok(Some(employee.clone())));

        let auth = Authenticator::new(Arc::new(repo), config());
        let token = auth
            .login("ada@example.com".to_string(), "Abcdefg1!".to_string())
            .await
            .unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert!(!token.password_expired);

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, "usr_1");
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_login_reports_expired_password() {
        let hash = hash_password("Abcdefg1!").await.unwrap().into_string();
        let mut employee = employee_with_hash(hash);
        employee.password_last_changed = Utc::now() - Duration::days(30);

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(employee.clone())));

        let auth = Authenticator::new(Arc::new(repo), config());
        let token = auth
            .login("ada@example.com".to_string(), "Abcdefg1!".to_string())
            .await
            .unwrap();

        assert!(token.password_expired);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hash = hash_password("Abcdefg1!").await.unwrap().into_string();
        let employee = employee_with_hash(hash);

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(employee.clone())));

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth
            .login("ada@example.com".to_string(), "wrong".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth
            .login("nobody@example.com".to_string(), "whatever".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_with_corrupt_stored_hash_is_rejected() {
        let employee = employee_with_hash("corrupted".to_string());

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(employee.clone())));

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth
            .login("ada@example.com".to_string(), "corrupted".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let auth = Authenticator::new(Arc::new(MockEmployeeRepository::new()), config());
        assert!(matches!(
            auth.verify_token("not.a.jwt"),
            Err(AppError::Jwt(_))
        ));
    }

    #[tokio::test]
    async fn test_change_password_stores_new_hash() {
        let hash = hash_password("OldPass1!").await.unwrap().into_string();
        let employee = employee_with_hash(hash);
        let updated = employee.clone();

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id()
            .with(eq("usr_1"))
            .returning(move |_| Ok(Some(employee.clone())));
        repo.expect_update_password()
            .withf(|id, hash| id == "usr_1" && hash.starts_with("$2b$12$"))
            .times(1)
            .returning(move |_, _| Ok(updated.clone()));

        let auth = Authenticator::new(Arc::new(repo), config());
        let strength = auth
            .change_password("usr_1", "OldPass1!".to_string(), "weak".to_string())
            .await
            .unwrap();

        // weak passwords are accepted and only scored
        assert_eq!(strength.score, 20);
    }

    #[tokio::test]
    async fn test_change_password_requires_current_password() {
        let hash = hash_password("OldPass1!").await.unwrap().into_string();
        let employee = employee_with_hash(hash);

        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(employee.clone())));
        repo.expect_update_password().never();

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth
            .change_password("usr_1", "guess".to_string(), "NewPass1!".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_unknown_employee() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let auth = Authenticator::new(Arc::new(repo), config());
        let result = auth
            .change_password("usr_404", "a".to_string(), "b".to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
