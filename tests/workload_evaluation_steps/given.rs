//! Given steps for workload evaluation BDD scenarios.

use std::collections::BTreeSet;

use super::world::{WorkloadWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use tfms::directory::domain::{DepartmentId, StaffId};
use tfms::task_force::{
    domain::{TaskForce, TaskForceDetails, TaskForceName},
    ports::TaskForceRepository,
};
use tfms::workload::domain::WorkloadThresholds;

fn store_task_force(
    world: &WorkloadWorld,
    name: String,
    weightage: u32,
    member: StaffId,
    chairman: Option<StaffId>,
    approved: bool,
) -> Result<(), eyre::Report> {
    let mut task_force = TaskForce::new(
        TaskForceDetails {
            name: TaskForceName::new(name)?,
            description: None,
            departments: BTreeSet::from([DepartmentId::new()]),
            weightage,
        },
        StaffId::new(),
        true,
        world.evaluator.settings().weightage_range(),
        &DefaultClock,
    )?;
    task_force.replace_members(BTreeSet::from([member]), chairman, &DefaultClock)?;
    if approved {
        task_force.submit(None, &DefaultClock)?;
        task_force.approve(&DefaultClock)?;
    }
    run_async(world.task_forces.store(&task_force)).wrap_err("store scenario task force")?;
    Ok(())
}

#[given("workload thresholds with min {min:u32} and max {max:u32}")]
fn workload_thresholds(world: &mut WorkloadWorld, min: u32, max: u32) -> Result<(), eyre::Report> {
    let thresholds = WorkloadThresholds::new(min, max)?;
    world.evaluator.settings().configure(thresholds)?;
    Ok(())
}

#[given(r#"a lecturer "{username}""#)]
fn lecturer(world: &mut WorkloadWorld, username: String) {
    world.staff.insert(username, StaffId::new());
}

#[given(r#""{username}" serves on an active task force "{name}" with weightage {weightage:u32}"#)]
fn serves_on_active(
    world: &mut WorkloadWorld,
    username: String,
    name: String,
    weightage: u32,
) -> Result<(), eyre::Report> {
    let member = world.staff_id(&username)?;
    store_task_force(world, name, weightage, member, None, false)
}

#[given(r#""{username}" serves on an approved task force "{name}" with weightage {weightage:u32}"#)]
fn serves_on_approved(
    world: &mut WorkloadWorld,
    username: String,
    name: String,
    weightage: u32,
) -> Result<(), eyre::Report> {
    let member = world.staff_id(&username)?;
    store_task_force(world, name, weightage, member, None, true)
}

#[given(r#""{username}" chairs and serves on "{name}" with weightage {weightage:u32}"#)]
fn chairs_and_serves(
    world: &mut WorkloadWorld,
    username: String,
    name: String,
    weightage: u32,
) -> Result<(), eyre::Report> {
    let member = world.staff_id(&username)?;
    store_task_force(world, name, weightage, member, Some(member), false)
}
