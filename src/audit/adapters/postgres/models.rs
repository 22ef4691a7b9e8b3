//! Diesel row models for audit log persistence.

use super::schema::audit_events;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row and insert model for audit events.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = audit_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditEventRow {
    /// Internal event identifier.
    pub id: uuid::Uuid,
    /// Acting staff identifier.
    pub actor_id: Option<uuid::Uuid>,
    /// Acting username.
    pub actor_username: Option<String>,
    /// Action code.
    pub action: String,
    /// Affected record kind.
    pub target_model: Option<String>,
    /// Affected record identifier.
    pub target_id: Option<String>,
    /// Free-text detail.
    pub detail: Option<String>,
    /// Resolved client address.
    pub source_ip: Option<String>,
    /// Record timestamp.
    pub recorded_at: DateTime<Utc>,
}
