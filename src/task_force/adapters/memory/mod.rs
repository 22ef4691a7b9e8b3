//! In-memory task force repository for tests and local tooling.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::StaffId;
use crate::task_force::{
    domain::{TaskForce, TaskForceId},
    ports::{
        TaskForceFilter, TaskForceRepository, TaskForceRepositoryError, TaskForceRepositoryResult,
    },
};

/// Thread-safe in-memory task force repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskForceRepository {
    task_forces: Arc<RwLock<HashMap<TaskForceId, TaskForce>>>,
}

impl InMemoryTaskForceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn select(
        &self,
        predicate: impl Fn(&TaskForce) -> bool,
    ) -> TaskForceRepositoryResult<Vec<TaskForce>> {
        let task_forces = self.task_forces.read().map_err(|err| {
            TaskForceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut selected: Vec<TaskForce> = task_forces
            .values()
            .filter(|task_force| predicate(task_force))
            .cloned()
            .collect();
        selected.sort_by(|left, right| {
            left.name()
                .as_str()
                .cmp(right.name().as_str())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(selected)
    }
}

#[async_trait]
impl TaskForceRepository for InMemoryTaskForceRepository {
    async fn store(&self, task_force: &TaskForce) -> TaskForceRepositoryResult<()> {
        let mut task_forces = self.task_forces.write().map_err(|err| {
            TaskForceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if task_forces.contains_key(&task_force.id()) {
            return Err(TaskForceRepositoryError::DuplicateTaskForce(task_force.id()));
        }
        task_forces.insert(task_force.id(), task_force.clone());
        Ok(())
    }

    async fn update(&self, task_force: &TaskForce) -> TaskForceRepositoryResult<()> {
        let mut task_forces = self.task_forces.write().map_err(|err| {
            TaskForceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let Some(existing) = task_forces.get_mut(&task_force.id()) else {
            return Err(TaskForceRepositoryError::NotFound(task_force.id()));
        };
        *existing = task_force.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskForceId) -> TaskForceRepositoryResult<Option<TaskForce>> {
        let task_forces = self.task_forces.read().map_err(|err| {
            TaskForceRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(task_forces.get(&id).cloned())
    }

    async fn find_involving(&self, staff: StaffId) -> TaskForceRepositoryResult<Vec<TaskForce>> {
        self.select(|task_force| task_force.involves(staff))
    }

    async fn list(&self, filter: &TaskForceFilter) -> TaskForceRepositoryResult<Vec<TaskForce>> {
        self.select(|task_force| filter.matches(task_force))
    }
}
