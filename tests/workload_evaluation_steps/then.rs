//! Then steps for workload evaluation BDD scenarios.

use super::world::{WorkloadWorld, run_async};
use rstest_bdd_macros::then;
use tfms::workload::{domain::WorkloadDomainError, services::WorkloadSettingsError};

fn check_workload(
    world: &WorkloadWorld,
    username: &str,
    additional: u32,
    status: &str,
    message: &str,
) -> Result<(), eyre::Report> {
    let staff = world.staff_id(username)?;
    let workload = run_async(world.evaluator.get_workload_status(staff, additional))?;
    if workload.status.as_str() != status || workload.message != message {
        return Err(eyre::eyre!(
            "expected {status} \"{message}\", found {} \"{}\"",
            workload.status,
            workload.message
        ));
    }
    Ok(())
}

#[then(r#"the workload of "{username}" is "{status}" with message "{message}""#)]
fn workload_is(
    world: &WorkloadWorld,
    username: String,
    status: String,
    message: String,
) -> Result<(), eyre::Report> {
    check_workload(world, &username, 0, &status, &message)
}

#[then(r#"with {additional:u32} more, "{username}" is "{status}" with message "{message}""#)]
fn predicted_workload_is(
    world: &WorkloadWorld,
    additional: u32,
    username: String,
    status: String,
    message: String,
) -> Result<(), eyre::Report> {
    check_workload(world, &username, additional, &status, &message)
}

#[then("the thresholds are rejected")]
fn thresholds_are_rejected(world: &WorkloadWorld) -> Result<(), eyre::Report> {
    match &world.last_settings_error {
        Some(WorkloadSettingsError::Domain(WorkloadDomainError::InvalidThresholdOrder {
            ..
        })) => Ok(()),
        other => Err(eyre::eyre!(
            "expected InvalidThresholdOrder error, got {other:?}"
        )),
    }
}

#[then("no workload thresholds are configured")]
fn no_thresholds(world: &WorkloadWorld) -> Result<(), eyre::Report> {
    if let Some(thresholds) = world.settings_service.settings().current() {
        return Err(eyre::eyre!("unexpected thresholds {thresholds:?}"));
    }
    Ok(())
}
