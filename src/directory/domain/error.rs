//! Error types for staff directory validation and parsing.

use super::{Role, StaffId};
use thiserror::Error;

/// Errors returned while constructing or mutating directory values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username contains whitespace or exceeds the storage limit.
    #[error("invalid username '{0}'")]
    InvalidUsername(String),

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The first name is empty after trimming.
    #[error("first name must not be empty")]
    EmptyFirstName,

    /// The department name is empty after trimming.
    #[error("department name must not be empty")]
    EmptyDepartmentName,

    /// The department name exceeds the 100-character storage limit.
    #[error("department name exceeds 100 character limit: {0}")]
    DepartmentNameTooLong(String),

    /// The role requires a department affiliation but none was given.
    #[error("department is required for {0}")]
    DepartmentRequired(Role),

    /// The account is locked and may not sign in.
    #[error("account {0} is locked; contact the administrator")]
    AccountLocked(StaffId),

    /// The account has been deactivated.
    #[error("account {0} is inactive")]
    AccountInactive(StaffId),
}

/// Errors returned when a candidate password violates the password policy.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// The password is longer than the configured maximum.
    #[error("password must contain at most {max_length} characters")]
    TooLong {
        /// Configured maximum length.
        max_length: usize,
    },

    /// The password lacks a letter or a digit.
    #[error("password must contain at least one letter and one number")]
    MissingLetterOrDigit,
}

/// Error returned while parsing roles from persistence or query strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
