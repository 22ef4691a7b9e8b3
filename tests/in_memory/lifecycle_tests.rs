//! End-to-end task force flows across directory, lifecycle and workload.

use std::collections::BTreeSet;

use super::helpers::{Campus, campus};
use eyre::ensure;
use rstest::rstest;
use tfms::audit::domain::RequestContext;
use tfms::directory::domain::Role;
use tfms::reporting::domain::StaffWorkloadQuery;
use tfms::task_force::{
    domain::{TaskForceDomainError, TaskForceStatus},
    services::{CreateTaskForceRequest, TaskForceServiceError, UpdateTaskForceRequest},
};
use tfms::workload::domain::WorkloadClass;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approved_task_force_loads_its_members(#[future] campus: Campus) -> eyre::Result<()> {
    let c = campus.await;
    let context = RequestContext::system();
    c.settings
        .save_thresholds(&c.admin, 5, 20, &context)
        .await?;
    let physics = c.department("Physics").await?;
    let hod = c.hire("hana", Role::HeadOfDepartment, &physics).await?;
    let reviewer = c.hire("petra", Role::ProjectManager, &physics).await?;
    let lecturer = c.hire("lee", Role::Lecturer, &physics).await?;

    let preview = c.evaluator.preview_membership(&[lecturer.id()], 8).await?;
    ensure!(
        preview.first().map(|entry| entry.workload.status) == Some(WorkloadClass::Balanced)
    );

    let draft = c
        .lifecycle
        .create(
            &hod,
            CreateTaskForceRequest::new("Accreditation", [physics.id()], 8)
                .with_description("Prepare the visit"),
            &context,
        )
        .await?;
    c.lifecycle
        .set_members(
            &hod,
            draft.id(),
            BTreeSet::from([lecturer.id()]),
            Some(hod.id()),
            &context,
        )
        .await?;
    let submitted = c
        .lifecycle
        .submit(&hod, draft.id(), Some("Visit in March"), &context)
        .await?;
    ensure!(submitted.warnings.is_empty());
    let approved = c
        .lifecycle
        .approve(&reviewer, draft.id(), &context)
        .await?;
    ensure!(approved.task_force.status() == TaskForceStatus::Approved);

    let status = c.evaluator.get_workload_status(lecturer.id(), 0).await?;
    ensure!(status.message == "Balanced (8/20)");
    let hod_load = c.evaluator.calculate_workload(hod.id()).await?;
    ensure!(hod_load == 8);

    let report = c
        .reports
        .staff_workload(&StaffWorkloadQuery::default().with_role(Role::Lecturer))
        .await?;
    ensure!(report.staff.len() == 1);
    ensure!(c.reports.assignments(lecturer.id()).await?.len() == 1);

    let sent = c.outbox.sent()?;
    ensure!(sent.len() == 2, "expected reviewer and creator emails, got {sent:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_task_force_stops_counting_until_reopened(
    #[future] campus: Campus,
) -> eyre::Result<()> {
    let c = campus.await;
    let context = RequestContext::system();
    c.settings
        .save_thresholds(&c.admin, 5, 20, &context)
        .await?;
    let physics = c.department("Physics").await?;
    let hod = c.hire("hana", Role::HeadOfDepartment, &physics).await?;
    let reviewer = c.hire("petra", Role::ProjectManager, &physics).await?;
    let lecturer = c.hire("lee", Role::Lecturer, &physics).await?;

    let task_force = c
        .lifecycle
        .create(
            &hod,
            CreateTaskForceRequest::new("Curriculum", [physics.id()], 6).finalized(),
            &context,
        )
        .await?;
    c.lifecycle
        .set_members(
            &hod,
            task_force.id(),
            BTreeSet::from([lecturer.id()]),
            None,
            &context,
        )
        .await?;
    c.lifecycle
        .submit(&hod, task_force.id(), None, &context)
        .await?;
    c.lifecycle
        .reject(&reviewer, task_force.id(), "Scope unclear", &context)
        .await?;
    ensure!(c.evaluator.calculate_workload(lecturer.id()).await? == 0);

    let reopened = c
        .lifecycle
        .save_draft(&hod, task_force.id(), true, &context)
        .await?;
    ensure!(reopened.status() == TaskForceStatus::Active);
    ensure!(c.evaluator.calculate_workload(lecturer.id()).await? == 6);

    let edited = c
        .lifecycle
        .update_details(
            &hod,
            task_force.id(),
            UpdateTaskForceRequest::new("Curriculum review", [physics.id()], 9),
            &context,
        )
        .await?;
    ensure!(edited.weightage() == 9);
    ensure!(c.evaluator.calculate_workload(lecturer.id()).await? == 9);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn raised_thresholds_bound_new_weightage(#[future] campus: Campus) -> eyre::Result<()> {
    let c = campus.await;
    let context = RequestContext::system();
    let physics = c.department("Physics").await?;
    let hod = c.hire("hana", Role::HeadOfDepartment, &physics).await?;

    c.settings
        .save_thresholds(&c.admin, 2, 10, &context)
        .await?;
    let refused = c
        .lifecycle
        .create(
            &hod,
            CreateTaskForceRequest::new("Senate", [physics.id()], 12),
            &context,
        )
        .await;
    ensure!(matches!(
        refused,
        Err(TaskForceServiceError::Domain(
            TaskForceDomainError::WeightageOutOfRange { .. }
        ))
    ));

    c.settings
        .save_thresholds(&c.admin, 2, 15, &context)
        .await?;
    let created = c
        .lifecycle
        .create(
            &hod,
            CreateTaskForceRequest::new("Senate", [physics.id()], 12),
            &context,
        )
        .await?;
    ensure!(created.weightage() == 12);
    Ok(())
}
