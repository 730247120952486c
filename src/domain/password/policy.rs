//! Declared password policy.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH};

/// Password requirements advertised to clients.
///
/// This is guidance only. The strength evaluator scores against it, but no
/// operation rejects a password for failing it, and `max_length` is never
/// checked anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_numbers: bool,
    pub require_special_chars: bool,
}

/// The policy currently in force.
pub const PASSWORD_POLICY: PasswordPolicy = PasswordPolicy {
    min_length: PASSWORD_MIN_LENGTH,
    max_length: PASSWORD_MAX_LENGTH,
    require_uppercase: true,
    require_lowercase: true,
    require_numbers: true,
    require_special_chars: true,
};
