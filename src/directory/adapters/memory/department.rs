//! In-memory department repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{Department, DepartmentId, DepartmentName},
    ports::{DepartmentRepository, DirectoryRepositoryError, DirectoryRepositoryResult},
};

/// Thread-safe in-memory department repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDepartmentRepository {
    state: Arc<RwLock<HashMap<DepartmentId, Department>>>,
}

impl InMemoryDepartmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn store(&self, department: &Department) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state
            .values()
            .any(|existing| existing.name() == department.name())
        {
            return Err(DirectoryRepositoryError::DuplicateDepartmentName(
                department.name().clone(),
            ));
        }
        state.insert(department.id(), department.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: DepartmentId) -> DirectoryRepositoryResult<Option<Department>> {
        let state = self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.get(&id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &DepartmentName,
    ) -> DirectoryRepositoryResult<Option<Department>> {
        let state = self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.values().find(|dept| dept.name() == name).cloned())
    }

    async fn list_all(&self) -> DirectoryRepositoryResult<Vec<Department>> {
        let state = self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut departments: Vec<Department> = state.values().cloned().collect();
        departments.sort_by(|left, right| left.name().cmp(right.name()));
        Ok(departments)
    }
}
