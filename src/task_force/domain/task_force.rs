//! Task force aggregate root.

use super::{TaskForceDomainError, TaskForceId, TaskForceName, TaskForceStatus};
use crate::directory::domain::{DepartmentId, StaffId};
use crate::workload::domain::WeightageRange;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Editable details of a task force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForceDetails {
    /// Display name.
    pub name: TaskForceName,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Associated departments; at least one is required.
    pub departments: BTreeSet<DepartmentId>,
    /// Workload weightage counted against each member.
    pub weightage: u32,
}

/// Parameter object for reconstructing a persisted task force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskForceData {
    /// Persisted identifier.
    pub id: TaskForceId,
    /// Persisted editable details.
    pub details: TaskForceDetails,
    /// Persisted rejection reason.
    pub rejection_reason: Option<String>,
    /// Persisted member set.
    pub members: BTreeSet<StaffId>,
    /// Persisted chairman.
    pub chairman: Option<StaffId>,
    /// Persisted creator.
    pub created_by: StaffId,
    /// Persisted status.
    pub status: TaskForceStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task force aggregate root.
///
/// Task forces are never deleted; deactivation retires them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForce {
    id: TaskForceId,
    name: TaskForceName,
    description: Option<String>,
    rejection_reason: Option<String>,
    departments: BTreeSet<DepartmentId>,
    weightage: u32,
    members: BTreeSet<StaffId>,
    chairman: Option<StaffId>,
    created_by: StaffId,
    status: TaskForceStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskForce {
    /// Creates a task force in [`TaskForceStatus::Draft`], or
    /// [`TaskForceStatus::Active`] when `finalize` is set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::NoDepartments`] or
    /// [`TaskForceDomainError::WeightageOutOfRange`] when the details are
    /// invalid.
    pub fn new(
        details: TaskForceDetails,
        created_by: StaffId,
        finalize: bool,
        range: WeightageRange,
        clock: &impl Clock,
    ) -> Result<Self, TaskForceDomainError> {
        validate_details(&details, range)?;
        let TaskForceDetails {
            name,
            description,
            departments,
            weightage,
        } = details;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskForceId::new(),
            name,
            description: normalize_text(description),
            rejection_reason: None,
            departments,
            weightage,
            members: BTreeSet::new(),
            chairman: None,
            created_by,
            status: if finalize {
                TaskForceStatus::Active
            } else {
                TaskForceStatus::Draft
            },
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task force from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskForceData) -> Self {
        let PersistedTaskForceData {
            id,
            details,
            rejection_reason,
            members,
            chairman,
            created_by,
            status,
            created_at,
            updated_at,
        } = data;
        Self {
            id,
            name: details.name,
            description: details.description,
            rejection_reason,
            departments: details.departments,
            weightage: details.weightage,
            members,
            chairman,
            created_by,
            status,
            created_at,
            updated_at,
        }
    }

    /// Returns the task force identifier.
    #[must_use]
    pub const fn id(&self) -> TaskForceId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &TaskForceName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the reason given on the latest rejection.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the associated departments.
    #[must_use]
    pub const fn departments(&self) -> &BTreeSet<DepartmentId> {
        &self.departments
    }

    /// Returns the workload weightage.
    #[must_use]
    pub const fn weightage(&self) -> u32 {
        self.weightage
    }

    /// Returns the member set.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<StaffId> {
        &self.members
    }

    /// Returns the chairman, if any.
    #[must_use]
    pub const fn chairman(&self) -> Option<StaffId> {
        self.chairman
    }

    /// Returns the account that created the task force.
    #[must_use]
    pub const fn created_by(&self) -> StaffId {
        self.created_by
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskForceStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the staff member is a member or the chairman.
    #[must_use]
    pub fn involves(&self, staff: StaffId) -> bool {
        self.chairman == Some(staff) || self.members.contains(&staff)
    }

    /// Returns `true` when the task force is associated with `department`.
    #[must_use]
    pub fn belongs_to(&self, department: DepartmentId) -> bool {
        self.departments.contains(&department)
    }

    /// Replaces the editable details.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::Locked`] when the status forbids
    /// edits, or a validation error when the details are invalid.
    pub fn update_details(
        &mut self,
        details: TaskForceDetails,
        range: WeightageRange,
        clock: &impl Clock,
    ) -> Result<(), TaskForceDomainError> {
        self.ensure_editable()?;
        validate_details(&details, range)?;
        self.name = details.name;
        self.description = normalize_text(details.description);
        self.departments = details.departments;
        self.weightage = details.weightage;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the member set and chairman.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::Locked`] when the status forbids
    /// edits.
    pub fn replace_members(
        &mut self,
        members: BTreeSet<StaffId>,
        chairman: Option<StaffId>,
        clock: &impl Clock,
    ) -> Result<(), TaskForceDomainError> {
        self.ensure_editable()?;
        self.members = members;
        self.chairman = chairman;
        self.touch(clock);
        Ok(())
    }

    /// Submits the task force for review.
    ///
    /// A non-blank justification is appended to the description.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::InvalidStateTransition`] unless the
    /// task force is draft or active.
    pub fn submit(
        &mut self,
        justification: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), TaskForceDomainError> {
        self.transition(
            TaskForceStatus::Submitted,
            &[TaskForceStatus::Draft, TaskForceStatus::Active],
        )?;
        if let Some(note) = justification.map(str::trim).filter(|note| !note.is_empty()) {
            let appended = self.description.as_deref().map_or_else(
                || format!("Justification: {note}"),
                |existing| format!("{existing}\n\nJustification: {note}"),
            );
            self.description = Some(appended);
        }
        self.touch(clock);
        Ok(())
    }

    /// Approves a submitted task force.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::InvalidStateTransition`] unless the
    /// task force is submitted.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), TaskForceDomainError> {
        self.transition(TaskForceStatus::Approved, &[TaskForceStatus::Submitted])?;
        self.touch(clock);
        Ok(())
    }

    /// Rejects a submitted task force with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::MissingRejectionReason`] when the
    /// reason is blank, or [`TaskForceDomainError::InvalidStateTransition`]
    /// unless the task force is submitted. The status is unchanged on error.
    pub fn reject(&mut self, reason: &str, clock: &impl Clock) -> Result<(), TaskForceDomainError> {
        let trimmed = reason.trim();
        if trimmed.is_empty() {
            return Err(TaskForceDomainError::MissingRejectionReason);
        }
        self.transition(TaskForceStatus::Rejected, &[TaskForceStatus::Submitted])?;
        self.rejection_reason = Some(trimmed.to_owned());
        self.touch(clock);
        Ok(())
    }

    /// Saves the task force as a draft, or finalizes it as active.
    ///
    /// Drafts stay drafts unless `finalize` is set. Active task forces stay
    /// active. Rejected task forces are reopened as drafts, or as active when
    /// `finalize` is set, and their rejection reason is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::Locked`] when the task force is
    /// submitted, approved or inactive.
    pub fn save_draft(
        &mut self,
        finalize: bool,
        clock: &impl Clock,
    ) -> Result<(), TaskForceDomainError> {
        self.ensure_editable()?;
        let target = match (self.status, finalize) {
            (TaskForceStatus::Draft | TaskForceStatus::Rejected, true)
            | (TaskForceStatus::Active, _) => TaskForceStatus::Active,
            (TaskForceStatus::Draft | TaskForceStatus::Rejected, false) => TaskForceStatus::Draft,
            (
                TaskForceStatus::Submitted | TaskForceStatus::Approved | TaskForceStatus::Inactive,
                _,
            ) => {
                return Err(TaskForceDomainError::Locked {
                    id: self.id,
                    status: self.status,
                });
            }
        };
        if self.status == TaskForceStatus::Rejected {
            self.rejection_reason = None;
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Retires the task force.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceDomainError::InvalidStateTransition`] unless the
    /// task force is draft, active or rejected.
    pub fn deactivate(&mut self, clock: &impl Clock) -> Result<(), TaskForceDomainError> {
        self.transition(
            TaskForceStatus::Inactive,
            &[
                TaskForceStatus::Draft,
                TaskForceStatus::Active,
                TaskForceStatus::Rejected,
            ],
        )?;
        self.touch(clock);
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), TaskForceDomainError> {
        if self.status.is_locked() {
            return Err(TaskForceDomainError::Locked {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    fn transition(
        &mut self,
        target: TaskForceStatus,
        allowed_sources: &[TaskForceStatus],
    ) -> Result<(), TaskForceDomainError> {
        if !allowed_sources.contains(&self.status) || !self.status.can_transition_to(target) {
            return Err(TaskForceDomainError::InvalidStateTransition {
                id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn validate_details(
    details: &TaskForceDetails,
    range: WeightageRange,
) -> Result<(), TaskForceDomainError> {
    if details.departments.is_empty() {
        return Err(TaskForceDomainError::NoDepartments);
    }
    if !range.contains(details.weightage) {
        return Err(TaskForceDomainError::WeightageOutOfRange {
            weightage: details.weightage,
            range,
        });
    }
    Ok(())
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
