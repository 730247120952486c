//! bcrypt credential hashing and verification.
//!
//! bcrypt is CPU-bound and deliberately slow, so both operations run on the
//! blocking thread pool and are awaited by the caller.

use tokio::task;

use crate::config::BCRYPT_COST;
use crate::errors::{AppError, AppResult};

/// Encoded bcrypt hash (cost and salt embedded).
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

// Don't expose hash in debug output (security)
impl std::fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CredentialHash").field(&"[REDACTED]").finish()
    }
}

impl CredentialHash {
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Log-safe name for a bcrypt failure.
///
/// Several variants carry the offending hash or cost string in their
/// message, so only the variant name may be logged.
pub(crate) fn bcrypt_error_kind(err: &bcrypt::BcryptError) -> &'static str {
    use bcrypt::BcryptError;

    match err {
        BcryptError::Io(_) => "io",
        BcryptError::CostNotAllowed(_) => "cost_not_allowed",
        BcryptError::InvalidCost(_) => "invalid_cost",
        BcryptError::InvalidPrefix(_) => "invalid_prefix",
        BcryptError::InvalidHash(_) => "invalid_hash",
        BcryptError::InvalidSaltLen(_) => "invalid_salt_len",
        BcryptError::InvalidBase64(_) => "invalid_base64",
        BcryptError::Rand(_) => "rand",
    }
}

/// Hash a password with a fresh random salt.
///
/// Hashing the same password twice yields different encodings; both verify.
///
/// # Errors
/// Propagates bcrypt failures and a panicked hashing worker.
pub async fn hash_password(password: &str) -> AppResult<CredentialHash> {
    let password = password.to_owned();

    let hash = task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))??;

    Ok(CredentialHash(hash))
}

/// Compare a plaintext password with a stored bcrypt hash.
///
/// Never errors: a malformed hash, a bcrypt failure or a failed worker all
/// resolve to `false`.
pub async fn verify_password(plain_password: &str, hashed_password: &str) -> bool {
    // UTF-16 units, the same unit the strength evaluator counts
    let plain_len = plain_password.encode_utf16().count();
    let hash_len = hashed_password.len();
    tracing::info!(plain_len, hash_len, "Verifying password");

    let plain = plain_password.to_owned();
    let hashed = hashed_password.to_owned();
    let outcome = task::spawn_blocking(move || bcrypt::verify(plain, &hashed)).await;

    let is_valid = match outcome {
        Ok(Ok(valid)) => valid,
        Ok(Err(e)) => {
            tracing::warn!(kind = bcrypt_error_kind(&e), hash_len, "Password verification error");
            false
        }
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            false
        }
    };

    tracing::info!(is_valid, "Password verification result");
    is_valid
}
