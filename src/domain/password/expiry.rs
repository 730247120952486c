//! Password age check.

use chrono::{DateTime, Utc};

use crate::config::{MILLIS_PER_DAY, PASSWORD_EXPIRATION_DAYS};

/// Whole days between `last_changed` and `now`, any partial day rounded up.
///
/// The distance is absolute: a timestamp in the future counts the same as
/// one equally far in the past.
pub fn days_since_change(last_changed: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let elapsed_ms = (now - last_changed).num_milliseconds().unsigned_abs();
    elapsed_ms.div_ceil(MILLIS_PER_DAY as u64) as i64
}

/// Whether a password last changed at `last_changed` is expired at `now`.
pub fn is_password_expired_at(last_changed: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    days_since_change(last_changed, now) > PASSWORD_EXPIRATION_DAYS
}

/// Whether a password last changed at `last_changed` is expired right now.
pub fn is_password_expired(last_changed: DateTime<Utc>) -> bool {
    is_password_expired_at(last_changed, Utc::now())
}
