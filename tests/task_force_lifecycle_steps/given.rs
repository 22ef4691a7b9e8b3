//! Given steps for task force lifecycle BDD scenarios.

use super::world::{LifecycleWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use tfms::audit::domain::RequestContext;
use tfms::directory::{
    domain::{EmailAddress, NewStaffMember, Role, StaffMember, Username},
    ports::StaffRepository,
};
use tfms::task_force::services::CreateTaskForceRequest;

fn register(world: &mut LifecycleWorld, username: &str, role: Role) -> Result<(), eyre::Report> {
    let account = StaffMember::new(
        NewStaffMember {
            username: Username::new(username)?,
            first_name: username.to_owned(),
            last_name: String::new(),
            email: EmailAddress::new(format!("{username}@uni.example"))?,
            role,
            department: Some(world.department),
        },
        &DefaultClock,
    )?;
    run_async(world.staff.store(&account)).wrap_err("store scenario account")?;
    world.accounts.insert(username.to_owned(), account);
    Ok(())
}

#[given(r#"a department head "{username}""#)]
fn department_head(world: &mut LifecycleWorld, username: String) -> Result<(), eyre::Report> {
    register(world, &username, Role::HeadOfDepartment)
}

#[given(r#"a reviewer "{username}""#)]
fn reviewer(world: &mut LifecycleWorld, username: String) -> Result<(), eyre::Report> {
    register(world, &username, Role::ProjectManager)
}

#[given(r#"a lecturer "{username}""#)]
fn lecturer(world: &mut LifecycleWorld, username: String) -> Result<(), eyre::Report> {
    register(world, &username, Role::Lecturer)
}

#[given(r#"an active task force "{name}" with weightage {weightage:u32} created by "{username}""#)]
fn active_task_force(
    world: &mut LifecycleWorld,
    name: String,
    weightage: u32,
    username: String,
) -> Result<(), eyre::Report> {
    let creator = world.account(&username)?;
    let request = CreateTaskForceRequest::new(name, [world.department], weightage).finalized();
    let created = run_async(
        world
            .service
            .create(&creator, request, &RequestContext::system()),
    )
    .wrap_err("create task force for scenario")?;
    world.task_force = Some(created);
    Ok(())
}
