//! Staff roles and the decisions that hinge on them.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a staff account.
///
/// Every authorization decision in the crate matches on this enum
/// exhaustively, so adding a role forces each decision point to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// System administrator: manages accounts, departments and settings.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Head of department: assembles and submits task forces.
    #[serde(rename = "HOD")]
    HeadOfDepartment,
    /// Project supervisor/manager: reviews submitted task forces.
    #[serde(rename = "PSM")]
    ProjectManager,
    /// Dean: read-only access to aggregate reports.
    #[serde(rename = "DEAN")]
    Dean,
    /// Lecturer: views their own assignments.
    #[serde(rename = "LECTURER")]
    Lecturer,
}

/// Dashboard a signed-in staff member is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dashboard {
    /// Account, department and settings administration.
    Admin,
    /// Task-force assembly for department heads.
    HeadOfDepartment,
    /// Review queue for project supervisors.
    Review,
    /// Aggregate workload reports.
    Dean,
    /// Personal assignment list.
    Lecturer,
}

impl Dashboard {
    /// Returns the route path of the dashboard.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard/admin/",
            Self::HeadOfDepartment => "/dashboard/hod/",
            Self::Review => "/dashboard/psm/",
            Self::Dean => "/dashboard/dean/",
            Self::Lecturer => "/dashboard/lecturer/",
        }
    }
}

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Admin,
        Self::HeadOfDepartment,
        Self::ProjectManager,
        Self::Dean,
        Self::Lecturer,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::HeadOfDepartment => "HOD",
            Self::ProjectManager => "PSM",
            Self::Dean => "DEAN",
            Self::Lecturer => "LECTURER",
        }
    }

    /// Returns the human-readable role label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::HeadOfDepartment => "Head of Department",
            Self::ProjectManager => "Project Supervisor/Manager",
            Self::Dean => "Dean",
            Self::Lecturer => "Lecturer",
        }
    }

    /// Returns `true` when accounts with this role must belong to a
    /// department.
    #[must_use]
    pub const fn requires_department(self) -> bool {
        match self {
            Self::HeadOfDepartment | Self::Lecturer => true,
            Self::Admin | Self::ProjectManager | Self::Dean => false,
        }
    }

    /// Returns `true` when repeated failed logins may lock the account.
    #[must_use]
    pub const fn is_lockable(self) -> bool {
        match self {
            Self::Admin => false,
            Self::HeadOfDepartment | Self::ProjectManager | Self::Dean | Self::Lecturer => true,
        }
    }

    /// Returns `true` for roles allowed to manage accounts, departments,
    /// settings and task-force deactivation.
    #[must_use]
    pub const fn can_administer(self) -> bool {
        match self {
            Self::Admin => true,
            Self::HeadOfDepartment | Self::ProjectManager | Self::Dean | Self::Lecturer => false,
        }
    }

    /// Returns `true` for roles allowed to assemble and submit task forces.
    #[must_use]
    pub const fn can_assemble_task_forces(self) -> bool {
        match self {
            Self::HeadOfDepartment => true,
            Self::Admin | Self::ProjectManager | Self::Dean | Self::Lecturer => false,
        }
    }

    /// Returns `true` for roles allowed to approve or reject submissions.
    #[must_use]
    pub const fn can_review(self) -> bool {
        match self {
            Self::ProjectManager => true,
            Self::Admin | Self::HeadOfDepartment | Self::Dean | Self::Lecturer => false,
        }
    }

    /// Returns `true` for roles that may be enrolled as task-force members.
    #[must_use]
    pub const fn can_join_task_forces(self) -> bool {
        match self {
            Self::Lecturer | Self::Dean | Self::HeadOfDepartment | Self::ProjectManager => true,
            Self::Admin => false,
        }
    }

    /// Returns the dashboard this role lands on after signing in.
    #[must_use]
    pub const fn dashboard(self) -> Dashboard {
        match self {
            Self::Admin => Dashboard::Admin,
            Self::HeadOfDepartment => Dashboard::HeadOfDepartment,
            Self::ProjectManager => Dashboard::Review,
            Self::Dean => Dashboard::Dean,
            Self::Lecturer => Dashboard::Lecturer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ADMIN" => Ok(Self::Admin),
            "HOD" => Ok(Self::HeadOfDepartment),
            "PSM" => Ok(Self::ProjectManager),
            "DEAN" => Ok(Self::Dean),
            "LECTURER" => Ok(Self::Lecturer),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}
