//! Application services for recording and exporting the audit trail.

mod export;
mod trail;

pub use export::{AUDIT_CSV_HEADER, AuditExportError, write_csv};
pub use trail::AuditTrail;
