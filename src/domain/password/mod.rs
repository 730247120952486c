//! Password handling: strength scoring, bcrypt credentials and expiry.
//!
//! Everything here is stateless. Scoring and the expiry check are pure;
//! hashing and verification suspend while bcrypt runs off the async runtime.

mod expiry;
mod hasher;
mod policy;
mod strength;

pub use expiry::{days_since_change, is_password_expired, is_password_expired_at};
pub(crate) use hasher::bcrypt_error_kind;
pub use hasher::{hash_password, verify_password, CredentialHash};
pub use policy::{PasswordPolicy, PASSWORD_POLICY};
pub use strength::{calculate_password_strength, PasswordRequirements, PasswordStrength};
