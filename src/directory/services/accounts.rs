//! Staff account and department administration.

use crate::audit::{
    domain::{AuditAction, AuditEntry, RequestContext},
    ports::{AuditLogError, AuditLogRepository},
    services::AuditTrail,
};
use crate::directory::{
    domain::{
        Department, DepartmentId, DepartmentName, DirectoryDomainError, EmailAddress,
        LoginFailureOutcome, NewStaffMember, PasswordPolicyError, Role, SecurityPolicy, StaffId,
        StaffMember, Username,
    },
    ports::{DepartmentRepository, DirectoryRepositoryError, StaffFilter, StaffRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

const STAFF_MODEL: &str = "StaffMember";
const DEPARTMENT_MODEL: &str = "Department";

/// Request payload for creating a staff account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStaffRequest {
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    role: Role,
    department: Option<DepartmentId>,
}

impl CreateStaffRequest {
    /// Creates a request with the mandatory account fields.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            last_name: String::new(),
            email: email.into(),
            role,
            department: None,
        }
    }

    /// Sets the family name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    /// Sets the department affiliation.
    #[must_use]
    pub const fn with_department(mut self, department: DepartmentId) -> Self {
        self.department = Some(department);
        self
    }
}

/// Service-level errors for directory operations.
#[derive(Debug, Error)]
pub enum DirectoryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// The new password violates the password policy.
    #[error(transparent)]
    Password(#[from] PasswordPolicyError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
    /// The audit trail rejected the event.
    #[error(transparent)]
    Audit(#[from] AuditLogError),
    /// The acting account may not perform the operation.
    #[error("staff member {actor} is not permitted to {operation}")]
    Unauthorized {
        /// Acting account.
        actor: StaffId,
        /// Operation that was refused.
        operation: &'static str,
    },
    /// The referenced staff account does not exist.
    #[error("staff member not found: {0}")]
    StaffNotFound(StaffId),
    /// The referenced department does not exist.
    #[error("department not found: {0}")]
    DepartmentNotFound(DepartmentId),
}

/// Result type for directory service operations.
pub type DirectoryServiceResult<T> = Result<T, DirectoryServiceError>;

/// Staff directory orchestration service.
#[derive(Clone)]
pub struct DirectoryService<S, D, A, C>
where
    S: StaffRepository,
    D: DepartmentRepository,
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    staff: Arc<S>,
    departments: Arc<D>,
    audit: AuditTrail<A, C>,
    clock: Arc<C>,
    policy: SecurityPolicy,
}

impl<S, D, A, C> DirectoryService<S, D, A, C>
where
    S: StaffRepository,
    D: DepartmentRepository,
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new directory service with the default security policy.
    #[must_use]
    pub fn new(staff: Arc<S>, departments: Arc<D>, audit_log: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            staff,
            departments,
            audit: AuditTrail::new(audit_log, Arc::clone(&clock)),
            clock,
            policy: SecurityPolicy::default(),
        }
    }

    /// Replaces the security policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: SecurityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active security policy.
    #[must_use]
    pub const fn policy(&self) -> SecurityPolicy {
        self.policy
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Unauthorized`] for non-admin actors,
    /// [`DirectoryServiceError::Domain`] for an invalid name, or
    /// [`DirectoryServiceError::Repository`] when the name is taken.
    pub async fn create_department(
        &self,
        actor: &StaffMember,
        name: &str,
        context: &RequestContext,
    ) -> DirectoryServiceResult<Department> {
        require_admin(actor, "create departments")?;
        let department = Department::new(DepartmentName::new(name)?, &*self.clock);
        self.departments.store(&department).await?;
        self.audit
            .record(
                AuditEntry::by(actor, AuditAction::CreateDepartment)
                    .on(DEPARTMENT_MODEL, department.id())
                    .with_detail(format!("Created department {}", department.name())),
                context,
            )
            .await?;
        Ok(department)
    }

    /// Lists departments ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] when the lookup fails.
    pub async fn list_departments(&self) -> DirectoryServiceResult<Vec<Department>> {
        Ok(self.departments.list_all().await?)
    }

    /// Creates a staff account.
    ///
    /// New accounts must change their password on first sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Unauthorized`] for non-admin actors,
    /// [`DirectoryServiceError::DepartmentNotFound`] for an unknown
    /// department, [`DirectoryServiceError::Domain`] when validation fails,
    /// or [`DirectoryServiceError::Repository`] when the username is taken.
    pub async fn create_staff(
        &self,
        actor: &StaffMember,
        request: CreateStaffRequest,
        context: &RequestContext,
    ) -> DirectoryServiceResult<StaffMember> {
        require_admin(actor, "create staff accounts")?;
        let CreateStaffRequest {
            username,
            first_name,
            last_name,
            email,
            role,
            department,
        } = request;

        if role.requires_department()
            && let Some(department_id) = department
            && self.departments.find_by_id(department_id).await?.is_none()
        {
            return Err(DirectoryServiceError::DepartmentNotFound(department_id));
        }

        let staff = StaffMember::new(
            NewStaffMember {
                username: Username::new(username)?,
                first_name,
                last_name,
                email: EmailAddress::new(email)?,
                role,
                department,
            },
            &*self.clock,
        )?;
        self.staff.store(&staff).await?;
        self.audit
            .record(
                AuditEntry::by(actor, AuditAction::CreateUser)
                    .on(STAFF_MODEL, staff.id())
                    .with_detail(format!("Created {} account {}", role.label(), staff.username())),
                context,
            )
            .await?;
        Ok(staff)
    }

    /// Locks a staff account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Unauthorized`] for non-admin actors
    /// or [`DirectoryServiceError::StaffNotFound`] for an unknown account.
    pub async fn lock_staff(
        &self,
        actor: &StaffMember,
        id: StaffId,
        context: &RequestContext,
    ) -> DirectoryServiceResult<StaffMember> {
        self.administer(
            actor,
            id,
            AuditAction::LockUser,
            context,
            "lock accounts",
            |staff, clock| staff.lock(clock),
        )
        .await
    }

    /// Unlocks a staff account and resets its failed login counter.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Unauthorized`] for non-admin actors
    /// or [`DirectoryServiceError::StaffNotFound`] for an unknown account.
    pub async fn unlock_staff(
        &self,
        actor: &StaffMember,
        id: StaffId,
        context: &RequestContext,
    ) -> DirectoryServiceResult<StaffMember> {
        self.administer(
            actor,
            id,
            AuditAction::UnlockUser,
            context,
            "unlock accounts",
            |staff, clock| staff.unlock(clock),
        )
        .await
    }

    /// Reactivates a staff account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Unauthorized`] for non-admin actors
    /// or [`DirectoryServiceError::StaffNotFound`] for an unknown account.
    pub async fn activate_staff(
        &self,
        actor: &StaffMember,
        id: StaffId,
        context: &RequestContext,
    ) -> DirectoryServiceResult<StaffMember> {
        self.administer(
            actor,
            id,
            AuditAction::ActivateUser,
            context,
            "activate accounts",
            |staff, clock| staff.activate(clock),
        )
        .await
    }

    /// Deactivates a staff account.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Unauthorized`] for non-admin actors
    /// or [`DirectoryServiceError::StaffNotFound`] for an unknown account.
    pub async fn deactivate_staff(
        &self,
        actor: &StaffMember,
        id: StaffId,
        context: &RequestContext,
    ) -> DirectoryServiceResult<StaffMember> {
        self.administer(
            actor,
            id,
            AuditAction::DeactivateUser,
            context,
            "deactivate accounts",
            |staff, clock| staff.deactivate(clock),
        )
        .await
    }

    /// Records a failed sign-in attempt for `username`.
    ///
    /// Returns `None` when no account has that username; the attempt is
    /// still audited, without an actor.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] or
    /// [`DirectoryServiceError::Audit`] when persistence fails.
    pub async fn record_login_failure(
        &self,
        username: &str,
        context: &RequestContext,
    ) -> DirectoryServiceResult<Option<LoginFailureOutcome>> {
        let Some(mut staff) = self.find_by_raw_username(username).await? else {
            self.audit
                .record(
                    AuditEntry::anonymous(AuditAction::LoginFailed)
                        .with_detail(format!("Failed login for unknown username {username}")),
                    context,
                )
                .await?;
            return Ok(None);
        };

        let outcome = staff.record_failed_login(self.policy.max_failed_logins, &*self.clock);
        if matches!(
            outcome,
            LoginFailureOutcome::Counted { .. } | LoginFailureOutcome::LockedNow
        ) {
            self.staff.update(&staff).await?;
        }
        if outcome == LoginFailureOutcome::LockedNow {
            warn!(
                staff_id = %staff.id(),
                username = %staff.username(),
                "account locked after repeated failed logins"
            );
        }
        self.audit
            .record(
                AuditEntry::by(&staff, AuditAction::LoginFailed)
                    .on(STAFF_MODEL, staff.id())
                    .with_detail(failure_detail(outcome)),
                context,
            )
            .await?;
        Ok(Some(outcome))
    }

    /// Records a successful sign-in.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Domain`] when the account is locked
    /// or inactive, or [`DirectoryServiceError::StaffNotFound`] for an
    /// unknown account.
    pub async fn record_login_success(
        &self,
        id: StaffId,
        context: &RequestContext,
    ) -> DirectoryServiceResult<StaffMember> {
        let mut staff = self.require_staff(id).await?;
        let attempts_before = staff.failed_login_attempts();
        staff.record_successful_login(&*self.clock)?;
        if attempts_before > 0 {
            self.staff.update(&staff).await?;
        }
        self.audit
            .record(AuditEntry::by(&staff, AuditAction::Login), context)
            .await?;
        info!(
            staff_id = %staff.id(),
            dashboard = staff.role().dashboard().path(),
            "staff signed in"
        );
        Ok(staff)
    }

    /// Records a sign-out.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Audit`] when the audit trail fails.
    pub async fn record_logout(
        &self,
        staff: &StaffMember,
        context: &RequestContext,
    ) -> DirectoryServiceResult<()> {
        self.audit
            .record(AuditEntry::by(staff, AuditAction::Logout), context)
            .await?;
        Ok(())
    }

    /// Validates a new password and clears the forced change flag.
    ///
    /// Credential storage belongs to the authentication layer; only the
    /// policy check and the flag are handled here.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Password`] when the password violates
    /// the policy or [`DirectoryServiceError::StaffNotFound`] for an unknown
    /// account.
    pub async fn complete_password_change(
        &self,
        id: StaffId,
        new_password: &str,
        context: &RequestContext,
    ) -> DirectoryServiceResult<StaffMember> {
        self.policy.password.check(new_password)?;
        let mut staff = self.require_staff(id).await?;
        staff.complete_password_change(&*self.clock);
        self.staff.update(&staff).await?;
        self.audit
            .record(
                AuditEntry::by(&staff, AuditAction::ChangePassword).on(STAFF_MODEL, staff.id()),
                context,
            )
            .await?;
        Ok(staff)
    }

    /// Finds a staff account by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] when the lookup fails.
    pub async fn find_staff(&self, id: StaffId) -> DirectoryServiceResult<Option<StaffMember>> {
        Ok(self.staff.find_by_id(id).await?)
    }

    /// Lists staff accounts matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryServiceError::Repository`] when the lookup fails.
    pub async fn list_staff(
        &self,
        filter: &StaffFilter,
    ) -> DirectoryServiceResult<Vec<StaffMember>> {
        Ok(self.staff.list(filter).await?)
    }

    async fn find_by_raw_username(&self, raw: &str) -> DirectoryServiceResult<Option<StaffMember>> {
        let Ok(username) = Username::new(raw) else {
            return Ok(None);
        };
        Ok(self.staff.find_by_username(&username).await?)
    }

    async fn require_staff(&self, id: StaffId) -> DirectoryServiceResult<StaffMember> {
        self.staff
            .find_by_id(id)
            .await?
            .ok_or(DirectoryServiceError::StaffNotFound(id))
    }

    async fn administer<F>(
        &self,
        actor: &StaffMember,
        id: StaffId,
        action: AuditAction,
        context: &RequestContext,
        operation: &'static str,
        mutate: F,
    ) -> DirectoryServiceResult<StaffMember>
    where
        F: FnOnce(&mut StaffMember, &C) + Send,
    {
        require_admin(actor, operation)?;
        let mut staff = self.require_staff(id).await?;
        mutate(&mut staff, &*self.clock);
        self.staff.update(&staff).await?;
        self.audit
            .record(
                AuditEntry::by(actor, action)
                    .on(STAFF_MODEL, staff.id())
                    .with_detail(staff.username().as_str()),
                context,
            )
            .await?;
        Ok(staff)
    }
}

fn require_admin(actor: &StaffMember, operation: &'static str) -> DirectoryServiceResult<()> {
    if actor.can_act() && actor.role().can_administer() {
        Ok(())
    } else {
        Err(DirectoryServiceError::Unauthorized {
            actor: actor.id(),
            operation,
        })
    }
}

fn failure_detail(outcome: LoginFailureOutcome) -> String {
    match outcome {
        LoginFailureOutcome::Exempt => "Failed login; account exempt from lockout".to_owned(),
        LoginFailureOutcome::Counted { attempts } => format!("Failed login attempt {attempts}"),
        LoginFailureOutcome::LockedNow => "Account locked after repeated failed logins".to_owned(),
        LoginFailureOutcome::AlreadyLocked => "Failed login on locked account".to_owned(),
    }
}
