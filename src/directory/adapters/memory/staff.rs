//! In-memory staff repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{StaffId, StaffMember, Username},
    ports::{DirectoryRepositoryError, DirectoryRepositoryResult, StaffFilter, StaffRepository},
};

/// Thread-safe in-memory staff repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStaffRepository {
    state: Arc<RwLock<InMemoryStaffState>>,
}

#[derive(Debug, Default)]
struct InMemoryStaffState {
    staff: HashMap<StaffId, StaffMember>,
    username_index: HashMap<Username, StaffId>,
}

impl InMemoryStaffRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StaffRepository for InMemoryStaffRepository {
    async fn store(&self, staff: &StaffMember) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.staff.contains_key(&staff.id()) {
            return Err(DirectoryRepositoryError::DuplicateStaff(staff.id()));
        }
        if state.username_index.contains_key(staff.username()) {
            return Err(DirectoryRepositoryError::DuplicateUsername(
                staff.username().clone(),
            ));
        }

        state
            .username_index
            .insert(staff.username().clone(), staff.id());
        state.staff.insert(staff.id(), staff.clone());
        Ok(())
    }

    async fn update(&self, staff: &StaffMember) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let old_username = state
            .staff
            .get(&staff.id())
            .ok_or(DirectoryRepositoryError::StaffNotFound(staff.id()))?
            .username()
            .clone();

        if *staff.username() != old_username {
            if let Some(&indexed_id) = state.username_index.get(staff.username())
                && indexed_id != staff.id()
            {
                return Err(DirectoryRepositoryError::DuplicateUsername(
                    staff.username().clone(),
                ));
            }
            state.username_index.remove(&old_username);
            state
                .username_index
                .insert(staff.username().clone(), staff.id());
        }

        state.staff.insert(staff.id(), staff.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: StaffId) -> DirectoryRepositoryResult<Option<StaffMember>> {
        let state = self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.staff.get(&id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> DirectoryRepositoryResult<Option<StaffMember>> {
        let state = self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let staff = state
            .username_index
            .get(username)
            .and_then(|id| state.staff.get(id))
            .cloned();
        Ok(staff)
    }

    async fn list(&self, filter: &StaffFilter) -> DirectoryRepositoryResult<Vec<StaffMember>> {
        let state = self.state.read().map_err(|err| {
            DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut selected: Vec<StaffMember> = state
            .staff
            .values()
            .filter(|staff| filter.matches(staff))
            .cloned()
            .collect();
        selected.sort_by(|left, right| left.username().cmp(right.username()));
        Ok(selected)
    }
}
