//! Repository port for task force persistence.

use crate::directory::domain::{DepartmentId, StaffId};
use crate::task_force::domain::{TaskForce, TaskForceId, TaskForceStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task force repository operations.
pub type TaskForceRepositoryResult<T> = Result<T, TaskForceRepositoryError>;

/// Selection criteria for task force listings.
///
/// Empty criteria select every task force.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForceFilter {
    /// Restrict to these statuses; empty means any status.
    pub statuses: Vec<TaskForceStatus>,
    /// Restrict to task forces associated with this department.
    pub department: Option<DepartmentId>,
}

impl TaskForceFilter {
    /// Selects task forces in one status.
    #[must_use]
    pub fn with_status(status: TaskForceStatus) -> Self {
        Self {
            statuses: vec![status],
            department: None,
        }
    }

    /// Restricts the selection to one department.
    #[must_use]
    pub const fn in_department(mut self, department: DepartmentId) -> Self {
        self.department = Some(department);
        self
    }

    /// Returns `true` when the task force satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task_force: &TaskForce) -> bool {
        let status_matches =
            self.statuses.is_empty() || self.statuses.contains(&task_force.status());
        let department_matches = self
            .department
            .is_none_or(|department| task_force.belongs_to(department));
        status_matches && department_matches
    }
}

/// Task force persistence contract.
#[async_trait]
pub trait TaskForceRepository: Send + Sync {
    /// Stores a new task force with its departments and members.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceRepositoryError::DuplicateTaskForce`] when the ID
    /// already exists.
    async fn store(&self, task_force: &TaskForce) -> TaskForceRepositoryResult<()>;

    /// Persists changes to an existing task force, replacing its department
    /// and member sets.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceRepositoryError::NotFound`] when the task force
    /// does not exist.
    async fn update(&self, task_force: &TaskForce) -> TaskForceRepositoryResult<()>;

    /// Finds a task force by identifier.
    async fn find_by_id(&self, id: TaskForceId) -> TaskForceRepositoryResult<Option<TaskForce>>;

    /// Lists task forces in which the staff member is a member or the
    /// chairman, each at most once, ordered by name.
    async fn find_involving(&self, staff: StaffId) -> TaskForceRepositoryResult<Vec<TaskForce>>;

    /// Lists task forces matching the filter, ordered by name.
    async fn list(&self, filter: &TaskForceFilter) -> TaskForceRepositoryResult<Vec<TaskForce>>;
}

/// Errors returned by task force repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskForceRepositoryError {
    /// A task force with the same identifier already exists.
    #[error("duplicate task force identifier: {0}")]
    DuplicateTaskForce(TaskForceId),

    /// The task force was not found.
    #[error("task force not found: {0}")]
    NotFound(TaskForceId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskForceRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
