//! Then steps for task force lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use rstest_bdd_macros::then;
use tfms::audit::{
    domain::AuditAction,
    ports::{AuditFilter, AuditLogRepository},
};
use tfms::task_force::{
    domain::{TaskForceDomainError, TaskForceStatus},
    services::TaskForceServiceError,
};

#[then(r#"the task force status is "{status}""#)]
fn task_force_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskForceStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let id = world.current_task_force()?.id();
    let stored = run_async(world.service.find(id))?
        .ok_or_else(|| eyre::eyre!("task force {id} missing from repository"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"an email was sent to "{address}""#)]
fn email_was_sent(world: &LifecycleWorld, address: String) -> Result<(), eyre::Report> {
    let sent = world.outbox.sent()?;
    if !sent.iter().any(|email| email.to.as_str() == address) {
        return Err(eyre::eyre!("no email sent to {address}; sent: {sent:?}"));
    }
    Ok(())
}

#[then("the last action fails because a rejection reason is required")]
fn fails_for_missing_reason(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(TaskForceServiceError::Domain(TaskForceDomainError::MissingRejectionReason)) => Ok(()),
        other => Err(eyre::eyre!(
            "expected MissingRejectionReason error, got {other:?}"
        )),
    }
}

#[then("the last action fails because the task force is locked")]
fn fails_for_locked(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(TaskForceServiceError::Domain(TaskForceDomainError::Locked { .. })) => Ok(()),
        other => Err(eyre::eyre!("expected Locked error, got {other:?}")),
    }
}

#[then(r#"the audit trail records "{action}""#)]
fn audit_trail_records(world: &LifecycleWorld, action: String) -> Result<(), eyre::Report> {
    let expected = AuditAction::try_from(action.as_str())
        .map_err(|err| eyre::eyre!("invalid audit action in scenario: {err}"))?;
    let events = run_async(
        world
            .audit_log
            .list(&AuditFilter::default().with_action(expected)),
    )?;
    if events.is_empty() {
        return Err(eyre::eyre!("no {expected} event recorded"));
    }
    Ok(())
}
