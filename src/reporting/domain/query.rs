//! Staff workload query parameters.

use crate::directory::domain::{DepartmentId, Role};
use uuid::Uuid;

/// Selection for the staff workload report.
///
/// Only active staff are ever reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffWorkloadQuery {
    /// Restrict to these departments; empty means any department.
    pub departments: Vec<DepartmentId>,
    /// Restrict to one role.
    pub role: Option<Role>,
}

impl StaffWorkloadQuery {
    /// Builds a query from raw request parameters.
    ///
    /// A comma-separated `department_ids` list takes precedence over a single
    /// `department_id`, even when none of its entries parse. Unparseable
    /// identifiers and unknown role codes are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use tfms::directory::domain::Role;
    /// use tfms::reporting::domain::StaffWorkloadQuery;
    ///
    /// let query = StaffWorkloadQuery::from_params(None, None, Some("LECTURER"));
    /// assert_eq!(query.role, Some(Role::Lecturer));
    /// assert!(query.departments.is_empty());
    /// ```
    #[must_use]
    pub fn from_params(
        department_ids: Option<&str>,
        department_id: Option<&str>,
        role: Option<&str>,
    ) -> Self {
        let departments = match (non_blank(department_ids), non_blank(department_id)) {
            (Some(list), _) => parse_department_ids(list),
            (None, Some(single)) => parse_department_id(single).into_iter().collect(),
            (None, None) => Vec::new(),
        };
        Self {
            departments,
            role: non_blank(role).and_then(|code| Role::try_from(code).ok()),
        }
    }

    /// Restricts the query to the given departments.
    #[must_use]
    pub fn in_departments(mut self, departments: impl IntoIterator<Item = DepartmentId>) -> Self {
        self.departments = departments.into_iter().collect();
        self
    }

    /// Restricts the query to one role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Parses a comma-separated list of department identifiers, skipping
/// entries that are not identifiers.
#[must_use]
pub fn parse_department_ids(raw: &str) -> Vec<DepartmentId> {
    raw.split(',').filter_map(parse_department_id).collect()
}

fn parse_department_id(raw: &str) -> Option<DepartmentId> {
    Uuid::parse_str(raw.trim()).ok().map(DepartmentId::from_uuid)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
