//! Domain model for the staff directory.
//!
//! Staff accounts, departments, roles and the account security policy. Roles
//! are a closed enumeration and every decision keyed on them is an
//! exhaustive match.

mod department;
mod error;
mod ids;
mod names;
mod policy;
mod role;
mod staff;

pub use department::Department;
pub use error::{DirectoryDomainError, ParseRoleError, PasswordPolicyError};
pub use ids::{DepartmentId, StaffId};
pub use names::{DepartmentName, EmailAddress, Username};
pub use policy::{
    DEFAULT_MAX_FAILED_LOGINS, DEFAULT_MAX_PASSWORD_LENGTH, PasswordPolicy, SecurityPolicy,
};
pub use role::{Dashboard, Role};
pub use staff::{LoginFailureOutcome, NewStaffMember, PersistedStaffData, StaffMember};
