//! In-memory audit log for tests and local tooling.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::audit::{
    domain::AuditEvent,
    ports::{AuditFilter, AuditLogError, AuditLogRepository, AuditLogResult},
};

/// Thread-safe in-memory audit log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    events: Arc<RwLock<Vec<AuditEvent>>>,
}

impl InMemoryAuditLog {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLog {
    async fn append(&self, event: &AuditEvent) -> AuditLogResult<()> {
        let mut events = self.events.write().map_err(|err| {
            AuditLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if events.iter().any(|existing| existing.id() == event.id()) {
            return Err(AuditLogError::DuplicateEvent(event.id()));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn list(&self, filter: &AuditFilter) -> AuditLogResult<Vec<AuditEvent>> {
        let events = self.events.read().map_err(|err| {
            AuditLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        // Appends arrive in time order, so reversing yields newest first.
        Ok(events
            .iter()
            .rev()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect())
    }
}
