//! Port contracts for the audit trail.

pub mod repository;

pub use repository::{AuditFilter, AuditLogError, AuditLogRepository, AuditLogResult};
