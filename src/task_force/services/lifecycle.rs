//! Task force lifecycle orchestration.

use crate::audit::{
    domain::{AuditAction, AuditEntry, RequestContext},
    ports::{AuditLogError, AuditLogRepository},
    services::AuditTrail,
};
use crate::directory::{
    domain::{DepartmentId, Role, StaffId, StaffMember},
    ports::{DirectoryRepositoryError, StaffFilter, StaffRepository},
};
use crate::notification::{
    domain::NotificationKind, ports::Notifier, services::NotificationDispatcher,
};
use crate::task_force::{
    domain::{
        TaskForce, TaskForceDetails, TaskForceDomainError, TaskForceId, TaskForceName,
        TaskForceStatus,
    },
    ports::{TaskForceFilter, TaskForceRepository, TaskForceRepositoryError},
};
use crate::workload::services::WorkloadSettings;
use mockable::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

const TASK_FORCE_MODEL: &str = "TaskForce";

/// Request payload for creating a task force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskForceRequest {
    details: TaskForceInput,
    finalize: bool,
}

impl CreateTaskForceRequest {
    /// Creates a request with the mandatory fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        departments: impl IntoIterator<Item = DepartmentId>,
        weightage: u32,
    ) -> Self {
        Self {
            details: TaskForceInput::new(name, departments, weightage),
            finalize: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.details.description = Some(description.into());
        self
    }

    /// Creates the task force as active rather than draft.
    #[must_use]
    pub const fn finalized(mut self) -> Self {
        self.finalize = true;
        self
    }
}

/// Request payload for replacing a task force's editable details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskForceRequest {
    details: TaskForceInput,
}

impl UpdateTaskForceRequest {
    /// Creates a request with the mandatory fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        departments: impl IntoIterator<Item = DepartmentId>,
        weightage: u32,
    ) -> Self {
        Self {
            details: TaskForceInput::new(name, departments, weightage),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.details.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskForceInput {
    name: String,
    description: Option<String>,
    departments: BTreeSet<DepartmentId>,
    weightage: u32,
}

impl TaskForceInput {
    fn new(
        name: impl Into<String>,
        departments: impl IntoIterator<Item = DepartmentId>,
        weightage: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            departments: departments.into_iter().collect(),
            weightage,
        }
    }

    fn into_details(self) -> Result<TaskForceDetails, TaskForceDomainError> {
        Ok(TaskForceDetails {
            name: TaskForceName::new(self.name)?,
            description: self.description,
            departments: self.departments,
            weightage: self.weightage,
        })
    }
}

/// Result of a lifecycle transition that sends notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Task force after the transition.
    pub task_force: TaskForce,
    /// Problems that occurred after the transition was stored, such as a
    /// failed recipient lookup or delivery.
    pub warnings: Vec<String>,
}

/// Service-level errors for task force lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskForceServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskForceDomainError),
    /// Task force repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskForceRepositoryError),
    /// Staff lookup failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// The audit trail rejected the event.
    #[error(transparent)]
    Audit(#[from] AuditLogError),
    /// The task force does not exist.
    #[error("task force not found: {0}")]
    NotFound(TaskForceId),
    /// The acting account may not perform the operation.
    #[error("staff member {actor} is not permitted to {operation}")]
    Unauthorized {
        /// Acting account.
        actor: StaffId,
        /// Operation that was refused.
        operation: &'static str,
    },
    /// A proposed member or chairman does not exist.
    #[error("staff member not found: {0}")]
    MemberNotFound(StaffId),
    /// A proposed member or chairman may not join this task force.
    #[error("staff member {staff} cannot join the task force: {reason}")]
    IneligibleMember {
        /// Rejected staff account.
        staff: StaffId,
        /// Why the account was rejected.
        reason: &'static str,
    },
}

/// Result type for task force lifecycle operations.
pub type TaskForceServiceResult<T> = Result<T, TaskForceServiceError>;

/// Task force lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskForceLifecycleService<R, S, A, N, C>
where
    R: TaskForceRepository,
    S: StaffRepository,
    A: AuditLogRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    task_forces: Arc<R>,
    staff: Arc<S>,
    audit: AuditTrail<A, C>,
    notifications: NotificationDispatcher<N>,
    settings: WorkloadSettings,
    clock: Arc<C>,
}

impl<R, S, A, N, C> TaskForceLifecycleService<R, S, A, N, C>
where
    R: TaskForceRepository,
    S: StaffRepository,
    A: AuditLogRepository,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service.
    #[must_use]
    pub fn new(
        task_forces: Arc<R>,
        staff: Arc<S>,
        audit_log: Arc<A>,
        notifier: Arc<N>,
        settings: WorkloadSettings,
        clock: Arc<C>,
    ) -> Self {
        Self {
            task_forces,
            staff,
            audit: AuditTrail::new(audit_log, Arc::clone(&clock)),
            notifications: NotificationDispatcher::new(notifier),
            settings,
            clock,
        }
    }

    /// Creates a task force as draft, or as active when finalized.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Unauthorized`] unless the actor is an
    /// administrator or heads one of the departments, and
    /// [`TaskForceServiceError::Domain`] when the name, departments or
    /// weightage are invalid.
    pub async fn create(
        &self,
        actor: &StaffMember,
        request: CreateTaskForceRequest,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TaskForce> {
        let CreateTaskForceRequest {
            details: input,
            finalize,
        } = request;
        let details = input.into_details()?;
        authorize_management(actor, &details.departments, "create task forces")?;

        let task_force = TaskForce::new(
            details,
            actor.id(),
            finalize,
            self.settings.weightage_range(),
            &*self.clock,
        )?;
        self.task_forces.store(&task_force).await?;
        self.record(
            actor,
            AuditAction::CreateTaskForce,
            &task_force,
            format!(
                "Created task force {} as {}",
                task_force.name(),
                task_force.status()
            ),
            context,
        )
        .await?;
        info!(
            task_force_id = %task_force.id(),
            status = %task_force.status(),
            "task force created"
        );
        Ok(task_force)
    }

    /// Replaces the editable details of an unlocked task force.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Domain`] with
    /// [`TaskForceDomainError::Locked`] when the task force is submitted,
    /// approved or inactive, or a validation error when the details are
    /// invalid.
    pub async fn update_details(
        &self,
        actor: &StaffMember,
        id: TaskForceId,
        request: UpdateTaskForceRequest,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TaskForce> {
        let mut task_force = self.require(id).await?;
        authorize_management(actor, task_force.departments(), "edit this task force")?;
        let details = request.details.into_details()?;
        authorize_management(actor, &details.departments, "move the task force there")?;

        task_force.update_details(details, self.settings.weightage_range(), &*self.clock)?;
        self.task_forces.update(&task_force).await?;
        self.record(
            actor,
            AuditAction::UpdateTaskForce,
            &task_force,
            format!(
                "Updated task force {} (weightage {})",
                task_force.name(),
                task_force.weightage()
            ),
            context,
        )
        .await?;
        Ok(task_force)
    }

    /// Replaces the members and chairman of an unlocked task force.
    ///
    /// Newly added members and the chairman must be active staff in a role
    /// that may join task forces. Department heads may only add staff from
    /// their own department; existing members are kept regardless.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::MemberNotFound`] or
    /// [`TaskForceServiceError::IneligibleMember`] when a proposed member is
    /// unacceptable, and [`TaskForceServiceError::Domain`] with
    /// [`TaskForceDomainError::Locked`] when the task force is locked.
    pub async fn set_members(
        &self,
        actor: &StaffMember,
        id: TaskForceId,
        members: BTreeSet<StaffId>,
        chairman: Option<StaffId>,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TaskForce> {
        let mut task_force = self.require(id).await?;
        authorize_management(actor, task_force.departments(), "edit task force members")?;
        if task_force.status().is_locked() {
            return Err(TaskForceDomainError::Locked {
                id,
                status: task_force.status(),
            }
            .into());
        }

        let additions = members
            .iter()
            .chain(chairman.iter())
            .copied()
            .filter(|staff| !task_force.involves(*staff))
            .collect::<BTreeSet<StaffId>>();
        for staff_id in additions {
            self.check_eligible(actor, staff_id).await?;
        }

        let member_count = members.len();
        task_force.replace_members(members, chairman, &*self.clock)?;
        self.task_forces.update(&task_force).await?;
        self.record(
            actor,
            AuditAction::UpdateMembers,
            &task_force,
            format!(
                "Set {member_count} member(s) on task force {}",
                task_force.name()
            ),
            context,
        )
        .await?;
        Ok(task_force)
    }

    /// Submits a draft or active task force for review and notifies every
    /// active reviewer.
    ///
    /// Once the new status is stored, audit and notification failures are
    /// returned as warnings on the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Unauthorized`] unless the actor heads
    /// an associated department, and [`TaskForceServiceError::Domain`] when
    /// the status does not allow submission.
    pub async fn submit(
        &self,
        actor: &StaffMember,
        id: TaskForceId,
        justification: Option<&str>,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TransitionOutcome> {
        let mut task_force = self.require(id).await?;
        authorize_department_head(actor, task_force.departments(), "submit this task force")?;

        task_force.submit(justification, &*self.clock)?;
        self.task_forces.update(&task_force).await?;
        info!(task_force_id = %id, "task force submitted");

        let mut warnings = self
            .record_committed(
                actor,
                AuditAction::SubmitTaskForce,
                &task_force,
                format!("Submitted task force {} for approval", task_force.name()),
                context,
            )
            .await;
        match self
            .staff
            .list(&StaffFilter::active().with_role(Role::ProjectManager))
            .await
        {
            Ok(reviewers) => warnings.extend(
                self.notifications
                    .notify(NotificationKind::Submitted, &task_force, actor, &reviewers)
                    .await,
            ),
            Err(err) => {
                warn!(task_force_id = %id, error = %err, "reviewer lookup failed");
                warnings.push(format!(
                    "Could not notify reviewers of task force {}: {err}",
                    task_force.name()
                ));
            }
        }
        Ok(TransitionOutcome {
            task_force,
            warnings,
        })
    }

    /// Approves a submitted task force and notifies its creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Unauthorized`] unless the actor is a
    /// reviewer, and [`TaskForceServiceError::Domain`] unless the task force
    /// is submitted.
    pub async fn approve(
        &self,
        actor: &StaffMember,
        id: TaskForceId,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TransitionOutcome> {
        let mut task_force = self.require(id).await?;
        authorize_reviewer(actor, "approve task forces")?;

        task_force.approve(&*self.clock)?;
        self.task_forces.update(&task_force).await?;
        info!(task_force_id = %id, "task force approved");

        let mut warnings = self
            .record_committed(
                actor,
                AuditAction::ApproveTaskForce,
                &task_force,
                format!("Approved task force {}", task_force.name()),
                context,
            )
            .await;
        warnings.extend(
            self.notify_creator(NotificationKind::Approved, &task_force, actor)
                .await,
        );
        Ok(TransitionOutcome {
            task_force,
            warnings,
        })
    }

    /// Rejects a submitted task force with a reason and notifies its
    /// creator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Domain`] with
    /// [`TaskForceDomainError::MissingRejectionReason`] when the reason is
    /// blank; the task force stays submitted.
    pub async fn reject(
        &self,
        actor: &StaffMember,
        id: TaskForceId,
        reason: &str,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TransitionOutcome> {
        let mut task_force = self.require(id).await?;
        authorize_reviewer(actor, "reject task forces")?;

        task_force.reject(reason, &*self.clock)?;
        self.task_forces.update(&task_force).await?;
        info!(task_force_id = %id, "task force rejected");

        let mut warnings = self
            .record_committed(
                actor,
                AuditAction::RejectTaskForce,
                &task_force,
                format!(
                    "Rejected task force {}: {}",
                    task_force.name(),
                    task_force.rejection_reason().unwrap_or_default()
                ),
                context,
            )
            .await;
        warnings.extend(
            self.notify_creator(NotificationKind::Rejected, &task_force, actor)
                .await,
        );
        Ok(TransitionOutcome {
            task_force,
            warnings,
        })
    }

    /// Saves a task force as draft, or finalizes it as active.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Unauthorized`] unless the actor heads
    /// an associated department, and [`TaskForceServiceError::Domain`] when
    /// the task force is locked.
    pub async fn save_draft(
        &self,
        actor: &StaffMember,
        id: TaskForceId,
        finalize: bool,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TaskForce> {
        let mut task_force = self.require(id).await?;
        authorize_department_head(actor, task_force.departments(), "save this task force")?;

        let previous = task_force.status();
        task_force.save_draft(finalize, &*self.clock)?;
        self.task_forces.update(&task_force).await?;
        self.record(
            actor,
            AuditAction::SaveDraft,
            &task_force,
            format!(
                "Saved task force {} ({previous} -> {})",
                task_force.name(),
                task_force.status()
            ),
            context,
        )
        .await?;
        Ok(task_force)
    }

    /// Retires a draft, active or rejected task force.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Unauthorized`] for non-admin actors
    /// and [`TaskForceServiceError::Domain`] when the status does not allow
    /// deactivation.
    pub async fn deactivate(
        &self,
        actor: &StaffMember,
        id: TaskForceId,
        context: &RequestContext,
    ) -> TaskForceServiceResult<TaskForce> {
        let mut task_force = self.require(id).await?;
        if !(actor.can_act() && actor.role().can_administer()) {
            return Err(TaskForceServiceError::Unauthorized {
                actor: actor.id(),
                operation: "deactivate task forces",
            });
        }

        task_force.deactivate(&*self.clock)?;
        self.task_forces.update(&task_force).await?;
        self.record(
            actor,
            AuditAction::DeactivateTaskForce,
            &task_force,
            format!("Deactivated task force {}", task_force.name()),
            context,
        )
        .await?;
        info!(task_force_id = %id, "task force deactivated");
        Ok(task_force)
    }

    /// Finds a task force by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Repository`] when the lookup fails.
    pub async fn find(&self, id: TaskForceId) -> TaskForceServiceResult<Option<TaskForce>> {
        Ok(self.task_forces.find_by_id(id).await?)
    }

    /// Lists task forces matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, filter: &TaskForceFilter) -> TaskForceServiceResult<Vec<TaskForce>> {
        Ok(self.task_forces.list(filter).await?)
    }

    /// Lists task forces awaiting review.
    ///
    /// # Errors
    ///
    /// Returns [`TaskForceServiceError::Repository`] when the lookup fails.
    pub async fn review_queue(&self) -> TaskForceServiceResult<Vec<TaskForce>> {
        self.list(&TaskForceFilter::with_status(TaskForceStatus::Submitted))
            .await
    }

    async fn require(&self, id: TaskForceId) -> TaskForceServiceResult<TaskForce> {
        self.task_forces
            .find_by_id(id)
            .await?
            .ok_or(TaskForceServiceError::NotFound(id))
    }

    async fn check_eligible(
        &self,
        actor: &StaffMember,
        staff_id: StaffId,
    ) -> TaskForceServiceResult<()> {
        let staff = self
            .staff
            .find_by_id(staff_id)
            .await?
            .ok_or(TaskForceServiceError::MemberNotFound(staff_id))?;
        let reason = if !staff.is_active() {
            Some("account is inactive")
        } else if !staff.role().can_join_task_forces() {
            Some("role cannot join task forces")
        } else if actor.role() == Role::HeadOfDepartment
            && staff.department() != actor.department()
        {
            Some("not in the department head's department")
        } else {
            None
        };
        reason.map_or(Ok(()), |why| {
            Err(TaskForceServiceError::IneligibleMember {
                staff: staff_id,
                reason: why,
            })
        })
    }

    async fn notify_creator(
        &self,
        kind: NotificationKind,
        task_force: &TaskForce,
        actor: &StaffMember,
    ) -> Vec<String> {
        let creator = match self.staff.find_by_id(task_force.created_by()).await {
            Ok(Some(creator)) => creator,
            Ok(None) => {
                warn!(
                    task_force_id = %task_force.id(),
                    creator = %task_force.created_by(),
                    "task force creator no longer exists"
                );
                return vec![format!(
                    "Could not notify the creator of task force {}: account not found",
                    task_force.name()
                )];
            }
            Err(err) => {
                warn!(
                    task_force_id = %task_force.id(),
                    creator = %task_force.created_by(),
                    error = %err,
                    "creator lookup failed"
                );
                return vec![format!(
                    "Could not notify the creator of task force {}: {err}",
                    task_force.name()
                )];
            }
        };
        self.notifications
            .notify(kind, task_force, actor, std::slice::from_ref(&creator))
            .await
    }

    /// Records an already persisted transition. A failure cannot undo the
    /// transition, so it becomes a warning.
    async fn record_committed(
        &self,
        actor: &StaffMember,
        action: AuditAction,
        task_force: &TaskForce,
        detail: String,
        context: &RequestContext,
    ) -> Vec<String> {
        match self
            .record(actor, action, task_force, detail, context)
            .await
        {
            Ok(()) => Vec::new(),
            Err(err) => {
                warn!(
                    task_force_id = %task_force.id(),
                    action = %action,
                    error = %err,
                    "audit write failed after transition"
                );
                vec![format!(
                    "Task force {} changed but the audit entry was not written: {err}",
                    task_force.name()
                )]
            }
        }
    }

    async fn record(
        &self,
        actor: &StaffMember,
        action: AuditAction,
        task_force: &TaskForce,
        detail: String,
        context: &RequestContext,
    ) -> Result<(), AuditLogError> {
        self.audit
            .record(
                AuditEntry::by(actor, action)
                    .on(TASK_FORCE_MODEL, task_force.id())
                    .with_detail(detail),
                context,
            )
            .await?;
        Ok(())
    }
}

/// Administrators manage any task force; department heads manage those
/// associated with their department.
fn authorize_management(
    actor: &StaffMember,
    departments: &BTreeSet<DepartmentId>,
    operation: &'static str,
) -> TaskForceServiceResult<()> {
    let role = actor.role();
    let permitted = actor.can_act()
        && (role.can_administer()
            || (role.can_assemble_task_forces() && heads_any(actor, departments)));
    permit(actor, permitted, operation)
}

fn authorize_department_head(
    actor: &StaffMember,
    departments: &BTreeSet<DepartmentId>,
    operation: &'static str,
) -> TaskForceServiceResult<()> {
    let permitted =
        actor.can_act() && actor.role().can_assemble_task_forces() && heads_any(actor, departments);
    permit(actor, permitted, operation)
}

fn authorize_reviewer(actor: &StaffMember, operation: &'static str) -> TaskForceServiceResult<()> {
    permit(
        actor,
        actor.can_act() && actor.role().can_review(),
        operation,
    )
}

fn heads_any(actor: &StaffMember, departments: &BTreeSet<DepartmentId>) -> bool {
    actor
        .department()
        .is_some_and(|department| departments.contains(&department))
}

fn permit(
    actor: &StaffMember,
    permitted: bool,
    operation: &'static str,
) -> TaskForceServiceResult<()> {
    if permitted {
        Ok(())
    } else {
        Err(TaskForceServiceError::Unauthorized {
            actor: actor.id(),
            operation,
        })
    }
}
