//! Repository port for the append-only audit log.

use crate::audit::domain::{AuditAction, AuditEvent, AuditEventId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit log operations.
pub type AuditLogResult<T> = Result<T, AuditLogError>;

/// Selection criteria for audit log listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    /// Case-insensitive substring the actor's username must contain.
    pub actor_username_contains: Option<String>,
    /// Restrict to one action code.
    pub action: Option<AuditAction>,
}

impl AuditFilter {
    /// Restricts the selection to actors whose username contains `fragment`.
    ///
    /// Blank fragments are ignored.
    #[must_use]
    pub fn actor_contains(mut self, fragment: &str) -> Self {
        let trimmed = fragment.trim();
        self.actor_username_contains = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Restricts the selection to one action code.
    #[must_use]
    pub const fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Returns `true` when the event satisfies every criterion.
    ///
    /// Events without an actor never match an actor filter.
    #[must_use]
    pub fn matches(&self, event: &AuditEvent) -> bool {
        let actor_matches = self
            .actor_username_contains
            .as_deref()
            .is_none_or(|fragment| {
                event.actor_username().is_some_and(|username| {
                    username
                        .to_lowercase()
                        .contains(fragment.to_lowercase().as_str())
                })
            });
        let action_matches = self.action.is_none_or(|action| event.action() == action);
        actor_matches && action_matches
    }
}

/// Audit log persistence contract.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Appends an event.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::DuplicateEvent`] when the event ID already
    /// exists.
    async fn append(&self, event: &AuditEvent) -> AuditLogResult<()>;

    /// Lists events matching the filter, newest first.
    async fn list(&self, filter: &AuditFilter) -> AuditLogResult<Vec<AuditEvent>>;
}

/// Errors returned by audit log implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditLogError {
    /// An event with the same identifier already exists.
    #[error("duplicate audit event identifier: {0}")]
    DuplicateEvent(AuditEventId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditLogError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
