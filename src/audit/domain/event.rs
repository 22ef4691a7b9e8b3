//! Append-only audit event record.

use super::{AuditAction, RequestContext};
use crate::directory::domain::{StaffId, StaffMember};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use uuid::Uuid;

/// Unique identifier for an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditEventId(Uuid);

impl AuditEventId {
    /// Creates a new random audit event identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AuditEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AuditEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Staff account responsible for an audited action.
///
/// The username is captured at record time so the trail stays readable if
/// the account is later renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditActor {
    /// Staff identifier.
    pub id: StaffId,
    /// Username at the time of the action.
    pub username: String,
}

impl AuditActor {
    /// Captures the actor from a staff account.
    #[must_use]
    pub fn from_staff(staff: &StaffMember) -> Self {
        Self {
            id: staff.id(),
            username: staff.username().as_str().to_owned(),
        }
    }
}

/// Description of an action about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Actor, or `None` for anonymous actions such as failed sign-ins.
    pub actor: Option<AuditActor>,
    /// Action code.
    pub action: AuditAction,
    /// Kind of record affected, e.g. `TaskForce`.
    pub target_model: Option<String>,
    /// Identifier of the record affected.
    pub target_id: Option<String>,
    /// Free-text detail.
    pub detail: Option<String>,
}

impl AuditEntry {
    /// Creates an entry for an action by the given staff member.
    #[must_use]
    pub fn by(actor: &StaffMember, action: AuditAction) -> Self {
        Self {
            actor: Some(AuditActor::from_staff(actor)),
            action,
            target_model: None,
            target_id: None,
            detail: None,
        }
    }

    /// Creates an entry without an actor.
    #[must_use]
    pub const fn anonymous(action: AuditAction) -> Self {
        Self {
            actor: None,
            action,
            target_model: None,
            target_id: None,
            detail: None,
        }
    }

    /// Sets the affected record.
    #[must_use]
    pub fn on(mut self, model: impl Into<String>, id: impl fmt::Display) -> Self {
        self.target_model = Some(model.into());
        self.target_id = Some(id.to_string());
        self
    }

    /// Sets the free-text detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Recorded audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    id: AuditEventId,
    actor: Option<AuditActor>,
    action: AuditAction,
    target_model: Option<String>,
    target_id: Option<String>,
    detail: Option<String>,
    source_ip: Option<IpAddr>,
    recorded_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAuditEvent {
    /// Persisted event identifier.
    pub id: AuditEventId,
    /// Persisted actor.
    pub actor: Option<AuditActor>,
    /// Persisted action code.
    pub action: AuditAction,
    /// Persisted target model.
    pub target_model: Option<String>,
    /// Persisted target identifier.
    pub target_id: Option<String>,
    /// Persisted detail.
    pub detail: Option<String>,
    /// Persisted source address.
    pub source_ip: Option<IpAddr>,
    /// Persisted timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Stamps an entry with its request origin and the current time.
    #[must_use]
    pub fn record(entry: AuditEntry, context: &RequestContext, clock: &impl Clock) -> Self {
        Self {
            id: AuditEventId::new(),
            actor: entry.actor,
            action: entry.action,
            target_model: entry.target_model,
            target_id: entry.target_id,
            detail: entry.detail,
            source_ip: context.client_ip(),
            recorded_at: clock.utc(),
        }
    }

    /// Reconstructs an event from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAuditEvent) -> Self {
        Self {
            id: data.id,
            actor: data.actor,
            action: data.action,
            target_model: data.target_model,
            target_id: data.target_id,
            detail: data.detail,
            source_ip: data.source_ip,
            recorded_at: data.recorded_at,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> AuditEventId {
        self.id
    }

    /// Returns the actor, if any.
    #[must_use]
    pub const fn actor(&self) -> Option<&AuditActor> {
        self.actor.as_ref()
    }

    /// Returns the actor's username, if any.
    #[must_use]
    pub fn actor_username(&self) -> Option<&str> {
        self.actor.as_ref().map(|actor| actor.username.as_str())
    }

    /// Returns the action code.
    #[must_use]
    pub const fn action(&self) -> AuditAction {
        self.action
    }

    /// Returns the affected record kind.
    #[must_use]
    pub fn target_model(&self) -> Option<&str> {
        self.target_model.as_deref()
    }

    /// Returns the affected record identifier.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// Returns the free-text detail.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the resolved client address.
    #[must_use]
    pub const fn source_ip(&self) -> Option<IpAddr> {
        self.source_ip
    }

    /// Returns the record timestamp.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
