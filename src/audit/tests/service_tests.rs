//! Tests for recording, listing and exporting the audit trail.

use std::sync::Arc;

use crate::audit::{
    adapters::memory::InMemoryAuditLog,
    domain::{AuditAction, AuditEntry, RequestContext},
    ports::AuditFilter,
    services::{AUDIT_CSV_HEADER, AuditTrail},
};
use crate::directory::domain::{EmailAddress, NewStaffMember, Role, StaffMember, Username};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestTrail = AuditTrail<InMemoryAuditLog, DefaultClock>;

#[fixture]
fn trail() -> TestTrail {
    AuditTrail::new(Arc::new(InMemoryAuditLog::new()), Arc::new(DefaultClock))
}

fn staff(username: &str, role: Role) -> StaffMember {
    StaffMember::new(
        NewStaffMember {
            username: Username::new(username).expect("valid username"),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            email: EmailAddress::new(format!("{username}@uni.example")).expect("valid email"),
            role,
            department: None,
        },
        &DefaultClock,
    )
    .expect("valid staff member")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_returns_newest_first(trail: TestTrail) -> eyre::Result<()> {
    let admin = staff("admin", Role::Admin);
    let context = RequestContext::system();
    trail
        .record(AuditEntry::by(&admin, AuditAction::Login), &context)
        .await?;
    trail
        .record(AuditEntry::by(&admin, AuditAction::Logout), &context)
        .await?;

    let events = trail.list(&AuditFilter::default()).await?;
    let actions: Vec<AuditAction> = events.iter().map(|event| event.action()).collect();

    ensure!(
        actions == vec![AuditAction::Logout, AuditAction::Login],
        "unexpected order: {actions:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_csv_writes_header_and_filtered_rows(trail: TestTrail) -> eyre::Result<()> {
    let admin = staff("admin", Role::Admin);
    let dean = staff("dean.smith", Role::Dean);
    let context = RequestContext::from_remote_addr("198.51.100.2".parse()?)
        .with_forwarded_for("203.0.113.50");
    trail
        .record(
            AuditEntry::by(&admin, AuditAction::CreateDepartment)
                .on("Department", "d-1")
                .with_detail("Created department Physics, Chemistry"),
            &context,
        )
        .await?;
    trail
        .record(AuditEntry::by(&dean, AuditAction::Login), &context)
        .await?;

    let csv = trail
        .export_csv(&AuditFilter::default().actor_contains("ADM"))
        .await?;
    let lines: Vec<&str> = csv.lines().collect();

    ensure!(lines.len() == 2, "expected header plus one row, got {lines:?}");
    ensure!(lines.first() == Some(&AUDIT_CSV_HEADER.join(",").as_str()));
    let row = lines.get(1).copied().unwrap_or_default();
    let expected = concat!(
        ",admin,CREATE_DEPARTMENT,Department,d-1,",
        "\"Created department Physics, Chemistry\",203.0.113.50"
    );
    ensure!(row.ends_with(expected), "unexpected row: {row}");
    let timestamp = row.split(',').next().unwrap_or_default();
    ensure!(timestamp.len() == 19, "unexpected timestamp: {timestamp}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_csv_names_anonymous_actor_system(trail: TestTrail) -> eyre::Result<()> {
    trail
        .record(
            AuditEntry::anonymous(AuditAction::LoginFailed).with_detail("unknown user ghost"),
            &RequestContext::system(),
        )
        .await?;

    let csv = trail.export_csv(&AuditFilter::default()).await?;
    let row = csv.lines().nth(1).unwrap_or_default();

    ensure!(
        row.ends_with(",System,LOGIN_FAILED,,,unknown user ghost,"),
        "unexpected row: {row}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn export_csv_of_empty_trail_is_header_only(trail: TestTrail) -> eyre::Result<()> {
    let csv = trail.export_csv(&AuditFilter::default()).await?;

    ensure!(csv == format!("{}\n", AUDIT_CSV_HEADER.join(",")));
    Ok(())
}
