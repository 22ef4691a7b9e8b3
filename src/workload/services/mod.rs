//! Application services for workload thresholds and evaluation.

mod evaluator;
mod settings;

pub use evaluator::{
    MembershipPreview, WorkloadEvaluationError, WorkloadEvaluationResult, WorkloadEvaluator,
};
pub use settings::{WorkloadSettings, WorkloadSettingsError, WorkloadSettingsService};
