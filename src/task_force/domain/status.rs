//! Task force lifecycle status and its transition table.

use super::ParseTaskForceStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task force lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskForceStatus {
    /// Being assembled; not yet finalized.
    Draft,
    /// Finalized and in effect; still editable.
    Active,
    /// Awaiting review.
    Submitted,
    /// Approved by a reviewer.
    Approved,
    /// Rejected by a reviewer; may be reworked.
    Rejected,
    /// Administratively deactivated.
    Inactive,
}

impl TaskForceStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::Active,
        Self::Submitted,
        Self::Approved,
        Self::Rejected,
        Self::Inactive,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Inactive => "inactive",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Submitted => "Submitted for Approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Inactive => "Inactive",
        }
    }

    /// Returns `true` when details and membership may not be edited.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        match self {
            Self::Submitted | Self::Approved | Self::Inactive => true,
            Self::Draft | Self::Active | Self::Rejected => false,
        }
    }

    /// Returns `true` when the task force's weightage counts toward its
    /// members' workload.
    #[must_use]
    pub const fn counts_toward_workload(self) -> bool {
        match self {
            Self::Draft | Self::Active | Self::Submitted | Self::Approved => true,
            Self::Rejected | Self::Inactive => false,
        }
    }

    /// Returns `true` when the lifecycle permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Active | Self::Submitted | Self::Inactive)
                | (Self::Active, Self::Submitted | Self::Inactive)
                | (Self::Submitted, Self::Approved | Self::Rejected)
                | (Self::Rejected, Self::Draft | Self::Active | Self::Inactive)
        )
    }
}

impl fmt::Display for TaskForceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskForceStatus {
    type Error = ParseTaskForceStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseTaskForceStatusError(value.to_owned())),
        }
    }
}
