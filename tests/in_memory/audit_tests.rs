//! Audit coverage across services and CSV export.

use super::helpers::{Campus, campus};
use eyre::ensure;
use rstest::rstest;
use tfms::audit::{
    domain::{AuditAction, RequestContext},
    ports::AuditFilter,
    services::AUDIT_CSV_HEADER,
};
use tfms::directory::domain::Role;
use tfms::task_force::services::CreateTaskForceRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_service_writes_to_one_trail(#[future] campus: Campus) -> eyre::Result<()> {
    let c = campus.await;
    let context = RequestContext::from_remote_addr("10.0.0.7".parse()?)
        .with_forwarded_for("203.0.113.9");
    c.settings
        .save_thresholds(&c.admin, 5, 20, &context)
        .await?;
    let physics = c.department("Physics").await?;
    let hod = c.hire("hana", Role::HeadOfDepartment, &physics).await?;
    c.lifecycle
        .create(
            &hod,
            CreateTaskForceRequest::new("Accreditation", [physics.id()], 6),
            &context,
        )
        .await?;

    let actions: Vec<AuditAction> = c
        .audit
        .list(&AuditFilter::default())
        .await?
        .iter()
        .rev()
        .map(|event| event.action())
        .collect();
    ensure!(
        actions
            == vec![
                AuditAction::UpdateSettings,
                AuditAction::CreateDepartment,
                AuditAction::CreateUser,
                AuditAction::CreateTaskForce,
            ],
        "unexpected actions: {actions:?}"
    );

    let settings_event = c
        .audit
        .list(&AuditFilter::default().with_action(AuditAction::UpdateSettings))
        .await?;
    ensure!(
        settings_event.first().and_then(|event| event.source_ip())
            == Some("203.0.113.9".parse()?)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_filters_by_actor_fragment(#[future] campus: Campus) -> eyre::Result<()> {
    let c = campus.await;
    let context = RequestContext::system();
    let physics = c.department("Physics").await?;
    let hod = c.hire("hana", Role::HeadOfDepartment, &physics).await?;
    c.lifecycle
        .create(
            &hod,
            CreateTaskForceRequest::new("Accreditation", [physics.id()], 6),
            &context,
        )
        .await?;

    let csv = c
        .audit
        .export_csv(&AuditFilter::default().actor_contains("HAN"))
        .await?;
    let mut lines = csv.lines();
    ensure!(lines.next() == Some(AUDIT_CSV_HEADER.join(",").as_str()));
    let rows: Vec<&str> = lines.collect();
    ensure!(rows.len() == 1, "unexpected rows: {rows:?}");
    ensure!(rows.iter().all(|row| row.contains(",hana,CREATE_TASK_FORCE,")));
    Ok(())
}
