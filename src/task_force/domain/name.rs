//! Task force display name.

use super::TaskForceDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a task force name, matching the `VARCHAR(200)` column.
pub const MAX_TASK_FORCE_NAME_LENGTH: usize = 200;

/// Validated task force name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskForceName(String);

impl TaskForceName {
    /// Creates a validated task force name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::EmptyName`] when the value is empty
    /// after trimming, or [`TaskForceDomainError::NameTooLong`] when it
    /// exceeds 200 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskForceDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskForceDomainError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length > MAX_TASK_FORCE_NAME_LENGTH {
            return Err(TaskForceDomainError::NameTooLong {
                length,
                max: MAX_TASK_FORCE_NAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskForceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
