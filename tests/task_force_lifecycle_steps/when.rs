//! When steps for task force lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use rstest_bdd_macros::when;
use tfms::audit::domain::RequestContext;

#[when(r#""{username}" submits the task force"#)]
fn submit(world: &mut LifecycleWorld, username: String) -> Result<(), eyre::Report> {
    let actor = world.account(&username)?;
    let id = world.current_task_force()?.id();
    let result = run_async(
        world
            .service
            .submit(&actor, id, None, &RequestContext::system()),
    );
    world.record(result.map(|outcome| outcome.task_force));
    Ok(())
}

#[when(r#""{username}" approves the task force"#)]
fn approve(world: &mut LifecycleWorld, username: String) -> Result<(), eyre::Report> {
    let actor = world.account(&username)?;
    let id = world.current_task_force()?.id();
    let result = run_async(world.service.approve(&actor, id, &RequestContext::system()));
    world.record(result.map(|outcome| outcome.task_force));
    Ok(())
}

#[when(r#""{username}" rejects the task force with reason "{reason}""#)]
fn reject_with_reason(
    world: &mut LifecycleWorld,
    username: String,
    reason: String,
) -> Result<(), eyre::Report> {
    let actor = world.account(&username)?;
    let id = world.current_task_force()?.id();
    let result = run_async(
        world
            .service
            .reject(&actor, id, &reason, &RequestContext::system()),
    );
    world.record(result.map(|outcome| outcome.task_force));
    Ok(())
}

#[when(r#""{username}" rejects the task force without a reason"#)]
fn reject_without_reason(world: &mut LifecycleWorld, username: String) -> Result<(), eyre::Report> {
    let actor = world.account(&username)?;
    let id = world.current_task_force()?.id();
    let result = run_async(
        world
            .service
            .reject(&actor, id, "   ", &RequestContext::system()),
    );
    world.record(result.map(|outcome| outcome.task_force));
    Ok(())
}

#[when(r#""{username}" adds "{member}" to the task force"#)]
fn add_member(
    world: &mut LifecycleWorld,
    username: String,
    member: String,
) -> Result<(), eyre::Report> {
    let actor = world.account(&username)?;
    let added = world.account(&member)?;
    let task_force = world.current_task_force()?;
    let id = task_force.id();
    let mut members = task_force.members().clone();
    members.insert(added.id());
    let chairman = task_force.chairman();
    let result = run_async(world.service.set_members(
        &actor,
        id,
        members,
        chairman,
        &RequestContext::system(),
    ));
    world.record(result);
    Ok(())
}

#[when(r#""{username}" saves the task force as a draft"#)]
fn save_draft(world: &mut LifecycleWorld, username: String) -> Result<(), eyre::Report> {
    let actor = world.account(&username)?;
    let id = world.current_task_force()?.id();
    let result = run_async(
        world
            .service
            .save_draft(&actor, id, false, &RequestContext::system()),
    );
    world.record(result);
    Ok(())
}
