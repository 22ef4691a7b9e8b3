//! Tests for the shared settings handle and the settings service.

use std::sync::Arc;

use crate::audit::{
    adapters::memory::InMemoryAuditLog,
    domain::{AuditAction, RequestContext},
    ports::{AuditFilter, AuditLogRepository},
    services::AuditTrail,
};
use crate::directory::domain::{
    DepartmentId, EmailAddress, NewStaffMember, Role, StaffMember, Username,
};
use crate::workload::{
    domain::{WeightageRange, WorkloadDomainError, WorkloadThresholds},
    services::{WorkloadSettings, WorkloadSettingsError, WorkloadSettingsService},
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;

fn staff(role: Role) -> StaffMember {
    StaffMember::new(
        NewStaffMember {
            username: Username::new(format!("{}-user", role.as_str().to_ascii_lowercase()))
                .expect("valid username"),
            first_name: "Sam".to_owned(),
            last_name: String::new(),
            email: EmailAddress::new("sam@uni.example").expect("valid email"),
            role,
            department: Some(DepartmentId::new()),
        },
        &DefaultClock,
    )
    .expect("valid staff member")
}

#[rstest]
fn configure_rejects_second_value() {
    let settings = WorkloadSettings::new();
    let first = WorkloadThresholds::new(5, 20).expect("valid thresholds");
    let second = WorkloadThresholds::new(2, 10).expect("valid thresholds");

    settings.configure(first).expect("first configure succeeds");
    let result = settings.configure(second);

    assert!(matches!(
        result,
        Err(WorkloadSettingsError::AlreadyConfigured(existing)) if existing == first
    ));
    assert_eq!(settings.current(), Some(first));
}

#[rstest]
fn update_replaces_and_is_shared_between_clones() {
    let settings = WorkloadSettings::new();
    let observer = settings.clone();
    assert_eq!(observer.weightage_range(), WeightageRange::FALLBACK);

    let thresholds = WorkloadThresholds::new(2, 12).expect("valid thresholds");
    let previous = settings.update(thresholds);

    assert_eq!(previous, None);
    assert_eq!(observer.current(), Some(thresholds));
    assert_eq!(observer.weightage_range(), thresholds.range());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_saves_thresholds_and_is_audited() -> eyre::Result<()> {
    let log = Arc::new(InMemoryAuditLog::new());
    let service = WorkloadSettingsService::new(
        WorkloadSettings::new(),
        AuditTrail::new(Arc::clone(&log), Arc::new(DefaultClock)),
    );
    let admin = staff(Role::Admin);

    service
        .save_thresholds(&admin, 5, 20, &RequestContext::system())
        .await?;
    service
        .save_thresholds(&admin, 4, 18, &RequestContext::system())
        .await?;

    let current = service.settings().current();
    ensure!(current == Some(WorkloadThresholds::new(4, 18)?));
    let events = log
        .list(&AuditFilter::default().with_action(AuditAction::UpdateSettings))
        .await?;
    ensure!(events.len() == 2);
    let latest = events.first().and_then(|event| event.detail()).unwrap_or_default();
    ensure!(latest.contains("min=5, max=20 to min=4, max=18"), "detail: {latest}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_thresholds_leave_settings_unchanged() {
    let initial = WorkloadThresholds::new(5, 20).expect("valid thresholds");
    let service = WorkloadSettingsService::new(
        WorkloadSettings::with_thresholds(initial),
        AuditTrail::new(Arc::new(InMemoryAuditLog::new()), Arc::new(DefaultClock)),
    );

    let result = service
        .save_thresholds(&staff(Role::Admin), 10, 5, &RequestContext::system())
        .await;

    assert!(matches!(
        result,
        Err(WorkloadSettingsError::Domain(
            WorkloadDomainError::InvalidThresholdOrder { min: 10, max: 5 }
        ))
    ));
    assert_eq!(service.settings().current(), Some(initial));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_admins_save_thresholds() {
    let service = WorkloadSettingsService::new(
        WorkloadSettings::new(),
        AuditTrail::new(Arc::new(InMemoryAuditLog::new()), Arc::new(DefaultClock)),
    );
    let dean = staff(Role::Dean);

    let result = service
        .save_thresholds(&dean, 5, 20, &RequestContext::system())
        .await;

    assert!(matches!(result, Err(WorkloadSettingsError::Unauthorized(id)) if id == dean.id()));
    assert_eq!(service.settings().current(), None);
}
