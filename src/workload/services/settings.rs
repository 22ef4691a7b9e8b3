//! Process-wide workload thresholds.

use crate::audit::{
    domain::{AuditAction, AuditEntry, RequestContext},
    ports::{AuditLogError, AuditLogRepository},
    services::AuditTrail,
};
use crate::directory::domain::{StaffId, StaffMember};
use crate::workload::domain::{WeightageRange, WorkloadDomainError, WorkloadThresholds};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::info;

const SETTINGS_MODEL: &str = "WorkloadSettings";

/// Errors returned while configuring workload thresholds.
#[derive(Debug, Error)]
pub enum WorkloadSettingsError {
    /// The requested thresholds are invalid.
    #[error(transparent)]
    Domain(#[from] WorkloadDomainError),
    /// Thresholds already exist; use an update instead.
    #[error("workload settings already configured as {}..={}", .0.min(), .0.max())]
    AlreadyConfigured(WorkloadThresholds),
    /// The acting account may not change settings.
    #[error("staff member {0} is not permitted to change workload settings")]
    Unauthorized(StaffId),
    /// The audit trail rejected the event.
    #[error(transparent)]
    Audit(#[from] AuditLogError),
}

/// Shared handle to the single thresholds value.
///
/// Clones share the same value. The handle starts empty unless built with
/// [`WorkloadSettings::with_thresholds`].
#[derive(Debug, Clone, Default)]
pub struct WorkloadSettings {
    thresholds: Arc<RwLock<Option<WorkloadThresholds>>>,
}

impl WorkloadSettings {
    /// Creates an unconfigured handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle holding `thresholds`.
    #[must_use]
    pub fn with_thresholds(thresholds: WorkloadThresholds) -> Self {
        Self {
            thresholds: Arc::new(RwLock::new(Some(thresholds))),
        }
    }

    /// Returns the current thresholds, if configured.
    #[must_use]
    pub fn current(&self) -> Option<WorkloadThresholds> {
        *self
            .thresholds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the weightage range task forces must respect.
    ///
    /// Falls back to [`WeightageRange::FALLBACK`] while unconfigured.
    #[must_use]
    pub fn weightage_range(&self) -> WeightageRange {
        self.current()
            .map_or(WeightageRange::FALLBACK, WorkloadThresholds::range)
    }

    /// Sets the thresholds for the first time.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadSettingsError::AlreadyConfigured`] when thresholds
    /// already exist.
    pub fn configure(&self, thresholds: WorkloadThresholds) -> Result<(), WorkloadSettingsError> {
        let mut slot = self
            .thresholds
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = *slot {
            return Err(WorkloadSettingsError::AlreadyConfigured(existing));
        }
        *slot = Some(thresholds);
        Ok(())
    }

    /// Replaces the thresholds, returning the previous value.
    #[must_use = "the previous thresholds are returned for auditing"]
    pub fn update(&self, thresholds: WorkloadThresholds) -> Option<WorkloadThresholds> {
        self.thresholds
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(thresholds)
    }
}

/// Administrator-facing maintenance of the workload thresholds.
#[derive(Clone)]
pub struct WorkloadSettingsService<A, C>
where
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    settings: WorkloadSettings,
    audit: AuditTrail<A, C>,
}

impl<A, C> WorkloadSettingsService<A, C>
where
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new settings service.
    #[must_use]
    pub const fn new(settings: WorkloadSettings, audit: AuditTrail<A, C>) -> Self {
        Self { settings, audit }
    }

    /// Returns the shared settings handle.
    #[must_use]
    pub const fn settings(&self) -> &WorkloadSettings {
        &self.settings
    }

    /// Validates and stores new thresholds, creating them when absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadSettingsError::Unauthorized`] for non-admin actors,
    /// [`WorkloadSettingsError::Domain`] when `min >= max` or `max` exceeds
    /// the ceiling, or [`WorkloadSettingsError::Audit`] when the audit trail
    /// fails. Nothing is stored on validation failure.
    pub async fn save_thresholds(
        &self,
        actor: &StaffMember,
        min: u32,
        max: u32,
        context: &RequestContext,
    ) -> Result<WorkloadThresholds, WorkloadSettingsError> {
        if !(actor.can_act() && actor.role().can_administer()) {
            return Err(WorkloadSettingsError::Unauthorized(actor.id()));
        }
        let thresholds = WorkloadThresholds::new(min, max)?;
        let previous = self.settings.update(thresholds);
        let detail = previous.map_or_else(
            || format!("Configured workload thresholds min={min}, max={max}"),
            |old| {
                format!(
                    "Changed workload thresholds from min={}, max={} to min={min}, max={max}",
                    old.min(),
                    old.max()
                )
            },
        );
        info!(min, max, "workload thresholds saved");
        self.audit
            .record(
                AuditEntry::by(actor, AuditAction::UpdateSettings)
                    .on(SETTINGS_MODEL, "singleton")
                    .with_detail(detail),
                context,
            )
            .await?;
        Ok(thresholds)
    }
}
