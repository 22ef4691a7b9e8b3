//! Domain model for task forces.
//!
//! A task force moves through `draft`, `active`, `submitted` and then
//! `approved` or `rejected`; `draft`, `active` and `rejected` task forces may
//! be deactivated. Submitted, approved and inactive task forces are locked
//! against edits.

mod error;
mod ids;
mod name;
mod status;
mod task_force;

pub use error::{ParseTaskForceStatusError, TaskForceDomainError};
pub use ids::TaskForceId;
pub use name::{MAX_TASK_FORCE_NAME_LENGTH, TaskForceName};
pub use status::TaskForceStatus;
pub use task_force::{PersistedTaskForceData, TaskForce, TaskForceDetails};
