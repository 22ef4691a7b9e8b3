//! Repository ports for staff and department persistence.

use crate::directory::domain::{
    Department, DepartmentId, DepartmentName, Role, StaffId, StaffMember, Username,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// Selection criteria for staff listings.
///
/// Empty criteria select every account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffFilter {
    /// Restrict to these departments; empty means any department.
    pub departments: Vec<DepartmentId>,
    /// Restrict to one role.
    pub role: Option<Role>,
    /// Restrict to active accounts.
    pub active_only: bool,
}

impl StaffFilter {
    /// Selects active accounts only.
    #[must_use]
    pub fn active() -> Self {
        Self {
            active_only: true,
            ..Self::default()
        }
    }

    /// Restricts the selection to the given departments.
    #[must_use]
    pub fn in_departments(mut self, departments: impl IntoIterator<Item = DepartmentId>) -> Self {
        self.departments = departments.into_iter().collect();
        self
    }

    /// Restricts the selection to one role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Returns `true` when the staff member satisfies every criterion.
    #[must_use]
    pub fn matches(&self, staff: &StaffMember) -> bool {
        let department_matches = self.departments.is_empty()
            || staff
                .department()
                .is_some_and(|id| self.departments.contains(&id));
        let role_matches = self.role.is_none_or(|role| staff.role() == role);
        let active_matches = !self.active_only || staff.is_active();
        department_matches && role_matches && active_matches
    }
}

/// Staff account persistence contract.
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Stores a new staff account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateStaff`] when the ID
    /// already exists or [`DirectoryRepositoryError::DuplicateUsername`] when
    /// the username is taken.
    async fn store(&self, staff: &StaffMember) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing staff account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::StaffNotFound`] when the account
    /// does not exist.
    async fn update(&self, staff: &StaffMember) -> DirectoryRepositoryResult<()>;

    /// Finds a staff account by identifier.
    async fn find_by_id(&self, id: StaffId) -> DirectoryRepositoryResult<Option<StaffMember>>;

    /// Finds a staff account by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> DirectoryRepositoryResult<Option<StaffMember>>;

    /// Lists staff accounts matching the filter, ordered by username.
    async fn list(&self, filter: &StaffFilter) -> DirectoryRepositoryResult<Vec<StaffMember>>;
}

/// Department persistence contract.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Stores a new department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateDepartmentName`] when the
    /// name is taken.
    async fn store(&self, department: &Department) -> DirectoryRepositoryResult<()>;

    /// Finds a department by identifier.
    async fn find_by_id(&self, id: DepartmentId) -> DirectoryRepositoryResult<Option<Department>>;

    /// Finds a department by name.
    async fn find_by_name(
        &self,
        name: &DepartmentName,
    ) -> DirectoryRepositoryResult<Option<Department>>;

    /// Lists all departments ordered by name.
    async fn list_all(&self) -> DirectoryRepositoryResult<Vec<Department>>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// A staff account with the same identifier already exists.
    #[error("duplicate staff identifier: {0}")]
    DuplicateStaff(StaffId),

    /// A staff account with the same username already exists.
    #[error("duplicate username: {0}")]
    DuplicateUsername(Username),

    /// A department with the same name already exists.
    #[error("duplicate department name: {0}")]
    DuplicateDepartmentName(DepartmentName),

    /// The staff account was not found.
    #[error("staff member not found: {0}")]
    StaffNotFound(StaffId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
