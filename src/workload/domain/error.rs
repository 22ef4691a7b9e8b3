//! Error types for workload threshold validation.

use thiserror::Error;

/// Errors returned while constructing workload thresholds.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum WorkloadDomainError {
    /// The minimum is not strictly below the maximum.
    #[error("minimum workload {min} must be less than maximum workload {max}")]
    InvalidThresholdOrder {
        /// Requested minimum.
        min: u32,
        /// Requested maximum.
        max: u32,
    },

    /// The maximum exceeds the permitted ceiling.
    #[error("maximum workload {max} exceeds the ceiling of {ceiling}")]
    MaxAboveCeiling {
        /// Requested maximum.
        max: u32,
        /// Highest permitted maximum.
        ceiling: u32,
    },
}
