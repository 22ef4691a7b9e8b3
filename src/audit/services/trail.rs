//! Recording side of the audit trail.

use crate::audit::{
    domain::{AuditEntry, AuditEvent, RequestContext},
    ports::{AuditFilter, AuditLogRepository, AuditLogResult},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Records and lists audit events.
///
/// Every mutating service in the crate hands its outcome to an
/// `AuditTrail` after the state change has been persisted.
#[derive(Clone)]
pub struct AuditTrail<A, C>
where
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    log: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> AuditTrail<A, C>
where
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new audit trail over the given log.
    #[must_use]
    pub const fn new(log: Arc<A>, clock: Arc<C>) -> Self {
        Self { log, clock }
    }

    /// Stamps and appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::audit::ports::AuditLogError`] when the log rejects
    /// the append.
    pub async fn record(
        &self,
        entry: AuditEntry,
        context: &RequestContext,
    ) -> AuditLogResult<AuditEvent> {
        let event = AuditEvent::record(entry, context, &*self.clock);
        self.log.append(&event).await?;
        info!(
            action = %event.action(),
            actor = event.actor_username().unwrap_or("anonymous"),
            target_model = event.target_model().unwrap_or_default(),
            target_id = event.target_id().unwrap_or_default(),
            "audit event recorded"
        );
        Ok(event)
    }

    /// Lists recorded events, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::audit::ports::AuditLogError`] when the log cannot be
    /// read.
    pub async fn list(&self, filter: &AuditFilter) -> AuditLogResult<Vec<AuditEvent>> {
        self.log.list(filter).await
    }
}
