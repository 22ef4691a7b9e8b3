//! Domain model for workload evaluation.
//!
//! Thresholds bound the aggregate weightage a staff member should carry, and
//! each task force's own weightage. Classification is a pure function of the
//! predicted workload and the thresholds.

mod error;
mod status;
mod thresholds;

pub use error::WorkloadDomainError;
pub use status::{SETTINGS_NOT_CONFIGURED, Severity, WorkloadClass, WorkloadStatus};
pub use thresholds::{MAX_WORKLOAD_CEILING, WeightageRange, WorkloadThresholds};
