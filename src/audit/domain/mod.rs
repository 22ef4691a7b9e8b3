//! Domain model for the audit trail.
//!
//! Audit events are append-only. Each records who did what to which record,
//! from where, and when.

mod action;
mod context;
mod error;
mod event;

pub use action::AuditAction;
pub use context::RequestContext;
pub use error::ParseAuditActionError;
pub use event::{AuditActor, AuditEntry, AuditEvent, AuditEventId, PersistedAuditEvent};
