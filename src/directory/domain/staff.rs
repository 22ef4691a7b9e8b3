//! Staff member aggregate root.

use super::{DepartmentId, DirectoryDomainError, EmailAddress, Role, StaffId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Result of recording a failed sign-in attempt against an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginFailureOutcome {
    /// The account's role is never locked; nothing was counted.
    Exempt,
    /// The failure was counted and the account remains usable.
    Counted {
        /// Consecutive failures recorded so far.
        attempts: u32,
    },
    /// This failure reached the limit and locked the account.
    LockedNow,
    /// The account was already locked.
    AlreadyLocked,
}

/// Staff account aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    id: StaffId,
    username: Username,
    first_name: String,
    last_name: String,
    email: EmailAddress,
    role: Role,
    department: Option<DepartmentId>,
    active: bool,
    locked: bool,
    failed_login_attempts: u32,
    must_change_password: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated fields for a new staff account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaffMember {
    /// Sign-in name.
    pub username: Username,
    /// Given name.
    pub first_name: String,
    /// Family name; may be empty.
    pub last_name: String,
    /// Notification address.
    pub email: EmailAddress,
    /// Assigned role.
    pub role: Role,
    /// Department affiliation, required for some roles.
    pub department: Option<DepartmentId>,
}

/// Parameter object for reconstructing a persisted staff account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStaffData {
    /// Persisted staff identifier.
    pub id: StaffId,
    /// Persisted username.
    pub username: Username,
    /// Persisted given name.
    pub first_name: String,
    /// Persisted family name.
    pub last_name: String,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted role.
    pub role: Role,
    /// Persisted department affiliation.
    pub department: Option<DepartmentId>,
    /// Persisted active flag.
    pub active: bool,
    /// Persisted locked flag.
    pub locked: bool,
    /// Persisted failed login counter.
    pub failed_login_attempts: u32,
    /// Persisted forced password change flag.
    pub must_change_password: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl StaffMember {
    /// Creates a new active staff account that must change its password on
    /// first sign-in.
    ///
    /// Roles that do not require a department have any supplied department
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyFirstName`] when the first name is
    /// blank, or [`DirectoryDomainError::DepartmentRequired`] when the role
    /// requires a department and none was supplied.
    pub fn new(fields: NewStaffMember, clock: &impl Clock) -> Result<Self, DirectoryDomainError> {
        let NewStaffMember {
            username,
            first_name,
            last_name,
            email,
            role,
            department,
        } = fields;

        let given_name = first_name.trim();
        if given_name.is_empty() {
            return Err(DirectoryDomainError::EmptyFirstName);
        }

        let affiliation = match (role.requires_department(), department) {
            (true, None) => return Err(DirectoryDomainError::DepartmentRequired(role)),
            (true, Some(id)) => Some(id),
            (false, _) => None,
        };

        let timestamp = clock.utc();
        Ok(Self {
            id: StaffId::new(),
            username,
            first_name: given_name.to_owned(),
            last_name: last_name.trim().to_owned(),
            email,
            role,
            department: affiliation,
            active: true,
            locked: false,
            failed_login_attempts: 0,
            must_change_password: true,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a staff account from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStaffData) -> Self {
        Self {
            id: data.id,
            username: data.username,
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            role: data.role,
            department: data.department,
            active: data.active,
            locked: data.locked,
            failed_login_attempts: data.failed_login_attempts,
            must_change_password: data.must_change_password,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the staff identifier.
    #[must_use]
    pub const fn id(&self) -> StaffId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the full name, or the username when no name is recorded.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            self.username.as_str().to_owned()
        } else {
            trimmed.to_owned()
        }
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the department affiliation, if any.
    #[must_use]
    pub const fn department(&self) -> Option<DepartmentId> {
        self.department
    }

    /// Returns `true` when the account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` when the account is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the consecutive failed login count.
    #[must_use]
    pub const fn failed_login_attempts(&self) -> u32 {
        self.failed_login_attempts
    }

    /// Returns `true` when the account must change its password before using
    /// the dashboard.
    #[must_use]
    pub const fn must_change_password(&self) -> bool {
        self.must_change_password
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

    /// Returns `true` when the account can act: active and not locked.
    #[must_use]
    pub const fn can_act(&self) -> bool {
        self.active && !self.locked
    }

    /// Locks the account.
    pub fn lock(&mut self, clock: &impl Clock) {
        self.locked = true;
        self.touch(clock);
    }

    /// Unlocks the account and resets the failed login counter.
    pub fn unlock(&mut self, clock: &impl Clock) {
        self.locked = false;
        self.failed_login_attempts = 0;
        self.touch(clock);
    }

    /// Reactivates a deactivated account.
    pub fn activate(&mut self, clock: &impl Clock) {
        self.active = true;
        self.touch(clock);
    }

    /// Deactivates the account. Deactivated accounts drop out of staff
    /// listings but keep their history.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.active = false;
        self.touch(clock);
    }

    /// Records a failed sign-in attempt, locking the account once
    /// `max_failed_logins` consecutive failures have accumulated.
    pub fn record_failed_login(
        &mut self,
        max_failed_logins: u32,
        clock: &impl Clock,
    ) -> LoginFailureOutcome {
        if !self.role.is_lockable() {
            return LoginFailureOutcome::Exempt;
        }
        if self.locked {
            return LoginFailureOutcome::AlreadyLocked;
        }

        self.failed_login_attempts = self.failed_login_attempts.saturating_add(1);
        let outcome = if self.failed_login_attempts >= max_failed_logins {
            self.locked = true;
            LoginFailureOutcome::LockedNow
        } else {
            LoginFailureOutcome::Counted {
                attempts: self.failed_login_attempts,
            }
        };
        self.touch(clock);
        outcome
    }

    /// Records a successful sign-in, resetting the failed login counter.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::AccountLocked`] when a lockable account
    /// is locked, or [`DirectoryDomainError::AccountInactive`] when the
    /// account has been deactivated.
    pub fn record_successful_login(
        &mut self,
        clock: &impl Clock,
    ) -> Result<(), DirectoryDomainError> {
        if !self.active {
            return Err(DirectoryDomainError::AccountInactive(self.id));
        }
        if self.locked && self.role.is_lockable() {
            return Err(DirectoryDomainError::AccountLocked(self.id));
        }
        if self.failed_login_attempts > 0 {
            self.failed_login_attempts = 0;
            self.touch(clock);
        }
        Ok(())
    }

    /// Clears the forced password change flag.
    pub fn complete_password_change(&mut self, clock: &impl Clock) {
        self.must_change_password = false;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
