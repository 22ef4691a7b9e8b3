//! Error types for audit parsing.

use thiserror::Error;

/// Error returned while parsing audit action codes from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown audit action: {0}")]
pub struct ParseAuditActionError(pub String);
