//! Audit action codes.

use super::ParseAuditActionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action recorded by an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Successful sign-in.
    Login,
    /// Sign-out.
    Logout,
    /// Failed sign-in attempt.
    LoginFailed,
    /// Password changed through the forced change flow.
    ChangePassword,
    /// Staff account created.
    CreateUser,
    /// Staff account locked.
    LockUser,
    /// Staff account unlocked.
    UnlockUser,
    /// Staff account reactivated.
    ActivateUser,
    /// Staff account deactivated.
    DeactivateUser,
    /// Department created.
    CreateDepartment,
    /// Workload thresholds configured or changed.
    UpdateSettings,
    /// Task force created.
    CreateTaskForce,
    /// Task force details edited.
    UpdateTaskForce,
    /// Task force membership edited.
    UpdateMembers,
    /// Task force saved as draft or finalized.
    SaveDraft,
    /// Task force submitted for approval.
    SubmitTaskForce,
    /// Task force approved.
    ApproveTaskForce,
    /// Task force rejected.
    RejectTaskForce,
    /// Task force deactivated.
    DeactivateTaskForce,
}

impl AuditAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::LoginFailed => "LOGIN_FAILED",
            Self::ChangePassword => "CHANGE_PASSWORD",
            Self::CreateUser => "CREATE_USER",
            Self::LockUser => "LOCK_USER",
            Self::UnlockUser => "UNLOCK_USER",
            Self::ActivateUser => "ACTIVATE_USER",
            Self::DeactivateUser => "DEACTIVATE_USER",
            Self::CreateDepartment => "CREATE_DEPARTMENT",
            Self::UpdateSettings => "UPDATE_SETTINGS",
            Self::CreateTaskForce => "CREATE_TASK_FORCE",
            Self::UpdateTaskForce => "UPDATE_TASK_FORCE",
            Self::UpdateMembers => "UPDATE_MEMBERS",
            Self::SaveDraft => "SAVE_DRAFT",
            Self::SubmitTaskForce => "SUBMIT_TASK_FORCE",
            Self::ApproveTaskForce => "APPROVE_TASK_FORCE",
            Self::RejectTaskForce => "REJECT_TASK_FORCE",
            Self::DeactivateTaskForce => "DEACTIVATE_TASK_FORCE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AuditAction {
    type Error = ParseAuditActionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        let action = match normalized.as_str() {
            "LOGIN" => Self::Login,
            "LOGOUT" => Self::Logout,
            "LOGIN_FAILED" => Self::LoginFailed,
            "CHANGE_PASSWORD" => Self::ChangePassword,
            "CREATE_USER" => Self::CreateUser,
            "LOCK_USER" => Self::LockUser,
            "UNLOCK_USER" => Self::UnlockUser,
            "ACTIVATE_USER" => Self::ActivateUser,
            "DEACTIVATE_USER" => Self::DeactivateUser,
            "CREATE_DEPARTMENT" => Self::CreateDepartment,
            "UPDATE_SETTINGS" => Self::UpdateSettings,
            "CREATE_TASK_FORCE" => Self::CreateTaskForce,
            "UPDATE_TASK_FORCE" => Self::UpdateTaskForce,
            "UPDATE_MEMBERS" => Self::UpdateMembers,
            "SAVE_DRAFT" => Self::SaveDraft,
            "SUBMIT_TASK_FORCE" => Self::SubmitTaskForce,
            "APPROVE_TASK_FORCE" => Self::ApproveTaskForce,
            "REJECT_TASK_FORCE" => Self::RejectTaskForce,
            "DEACTIVATE_TASK_FORCE" => Self::DeactivateTaskForce,
            _ => return Err(ParseAuditActionError(value.to_owned())),
        };
        Ok(action)
    }
}
