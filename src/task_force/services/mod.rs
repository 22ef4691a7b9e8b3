//! Application services for task force lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskForceRequest, TaskForceLifecycleService, TaskForceServiceError,
    TaskForceServiceResult, TransitionOutcome, UpdateTaskForceRequest,
};
