//! Account security policy: password rules and login lockout.

use super::PasswordPolicyError;
use serde::{Deserialize, Serialize};

/// Default number of consecutive failed logins that locks an account.
pub const DEFAULT_MAX_FAILED_LOGINS: u32 = 3;

/// Default maximum password length.
pub const DEFAULT_MAX_PASSWORD_LENGTH: usize = 16;

/// Password composition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Maximum password length in characters.
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_PASSWORD_LENGTH,
        }
    }
}

impl PasswordPolicy {
    /// Checks a candidate password against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordPolicyError::TooLong`] when the password exceeds the
    /// maximum length, or [`PasswordPolicyError::MissingLetterOrDigit`] when
    /// it lacks a letter or a digit.
    pub fn check(&self, candidate: &str) -> Result<(), PasswordPolicyError> {
        if candidate.chars().count() > self.max_length {
            return Err(PasswordPolicyError::TooLong {
                max_length: self.max_length,
            });
        }
        let has_digit = candidate.chars().any(|c| c.is_ascii_digit());
        let has_letter = candidate.chars().any(char::is_alphabetic);
        if !has_digit || !has_letter {
            return Err(PasswordPolicyError::MissingLetterOrDigit);
        }
        Ok(())
    }
}

/// Combined account security settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityPolicy {
    /// Consecutive failed logins after which a lockable account is locked.
    pub max_failed_logins: u32,
    /// Password composition rules.
    pub password: PasswordPolicy,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            max_failed_logins: DEFAULT_MAX_FAILED_LOGINS,
            password: PasswordPolicy::default(),
        }
    }
}
