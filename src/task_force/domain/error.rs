//! Error types for task force validation and lifecycle transitions.

use super::{TaskForceId, TaskForceStatus};
use crate::workload::domain::WeightageRange;
use thiserror::Error;

/// Errors returned while constructing or mutating task forces.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskForceDomainError {
    /// The name is empty after trimming.
    #[error("task force name must not be empty")]
    EmptyName,

    /// The name exceeds the storage limit.
    #[error("task force name has {length} characters; at most {max} are allowed")]
    NameTooLong {
        /// Actual length in characters.
        length: usize,
        /// Maximum length in characters.
        max: usize,
    },

    /// No department was associated.
    #[error("a task force must belong to at least one department")]
    NoDepartments,

    /// The weightage falls outside the configured range.
    #[error("weightage must be between {} and {}, got {weightage}", range.min(), range.max())]
    WeightageOutOfRange {
        /// Requested weightage.
        weightage: u32,
        /// Accepted range.
        range: WeightageRange,
    },

    /// The task force is submitted, approved or inactive and cannot be
    /// edited.
    #[error("task force {id} is {status} and cannot be edited")]
    Locked {
        /// Task force identifier.
        id: TaskForceId,
        /// Current status.
        status: TaskForceStatus,
    },

    /// The lifecycle does not permit the requested transition.
    #[error("task force {id} cannot move from {from} to {to}")]
    InvalidStateTransition {
        /// Task force identifier.
        id: TaskForceId,
        /// Current status.
        from: TaskForceStatus,
        /// Requested status.
        to: TaskForceStatus,
    },

    /// A rejection was attempted without a reason.
    #[error("a rejection reason is required")]
    MissingRejectionReason,
}

/// Error returned while parsing task force statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task force status: {0}")]
pub struct ParseTaskForceStatusError(pub String);
