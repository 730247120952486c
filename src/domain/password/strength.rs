//! Password strength scoring.
//!
//! Scores a candidate against five independent requirements. Each satisfied
//! requirement is worth 20 points, so the score is always one of
//! 0, 20, 40, 60, 80 or 100. Scoring never rejects anything.

use serde::Serialize;
use utoipa::ToSchema;

use super::policy::PASSWORD_POLICY;
use crate::config::PASSWORD_SPECIAL_CHARS;

const POINTS_PER_REQUIREMENT: u8 = 20;

/// Message thresholds, highest first. The first entry whose threshold the
/// score reaches wins.
const STRENGTH_MESSAGES: [(u8, &str); 5] = [
    (100, "🎉 Perfect Your password is super strong"),
    (80, "💪 Almost there! Just a bit more to perfection"),
    (60, "🚀 Good progress! Keep going"),
    (40, "🌱 Getting stronger! You can do better"),
    (20, "🔑 Starting good! Let's make it stronger"),
];

const BASELINE_MESSAGE: &str = "🎮 Let's create a strong password together";

/// Which requirements a password satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequirements {
    pub min_length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special_char: bool,
}

impl PasswordRequirements {
    /// Check a password against every requirement.
    pub fn check(password: &str) -> Self {
        Self {
            // UTF-16 code units, matching the browser-side checker
            min_length: password.encode_utf16().count() >= PASSWORD_POLICY.min_length,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special_char: password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)),
        }
    }

    /// Number of satisfied requirements (0..=5).
    pub fn satisfied(&self) -> u8 {
        [
            self.min_length,
            self.uppercase,
            self.lowercase,
            self.number,
            self.special_char,
        ]
        .into_iter()
        .filter(|met| *met)
        .count() as u8
    }
}

/// Result of a strength evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PasswordStrength {
    /// 0-100, always a multiple of 20
    #[schema(example = 80)]
    pub score: u8,
    pub requirements: PasswordRequirements,
    #[schema(example = "💪 Almost there! Just a bit more to perfection")]
    pub message: String,
}

/// Evaluate the strength of a candidate password.
///
/// Accepts any input, including the empty string.
pub fn calculate_password_strength(password: &str) -> PasswordStrength {
    let requirements = PasswordRequirements::check(password);
    let score = requirements.satisfied() * POINTS_PER_REQUIREMENT;

    PasswordStrength {
        score,
        requirements,
        message: strength_message(score).to_string(),
    }
}

fn strength_message(score: u8) -> &'static str {
    STRENGTH_MESSAGES
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, message)| *message)
        .unwrap_or(BASELINE_MESSAGE)
}
