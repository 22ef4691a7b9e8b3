//! Tests for audit actions, request contexts and filters.

use crate::audit::{
    domain::{AuditAction, AuditEntry, AuditEvent, ParseAuditActionError, RequestContext},
    ports::AuditFilter,
};
use crate::directory::domain::{EmailAddress, NewStaffMember, Role, StaffMember, Username};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::net::IpAddr;

#[fixture]
fn admin() -> StaffMember {
    StaffMember::new(
        NewStaffMember {
            username: Username::new("Registrar").expect("valid username"),
            first_name: "Rita".to_owned(),
            last_name: "Osei".to_owned(),
            email: EmailAddress::new("rita@uni.example").expect("valid email"),
            role: Role::Admin,
            department: None,
        },
        &DefaultClock,
    )
    .expect("valid admin")
}

#[rstest]
#[case("LOGIN", AuditAction::Login)]
#[case("login_failed", AuditAction::LoginFailed)]
#[case(" REJECT_TASK_FORCE ", AuditAction::RejectTaskForce)]
fn audit_action_parses_storage_codes(#[case] raw: &str, #[case] expected: AuditAction) {
    assert_eq!(AuditAction::try_from(raw), Ok(expected));
}

#[rstest]
fn audit_action_rejects_unknown_codes() {
    assert_eq!(
        AuditAction::try_from("DROP_TABLE"),
        Err(ParseAuditActionError("DROP_TABLE".to_owned()))
    );
}

#[rstest]
fn audit_action_serializes_as_storage_code() {
    let json = serde_json::to_string(&AuditAction::DeactivateTaskForce).expect("serializes");
    assert_eq!(json, "\"DEACTIVATE_TASK_FORCE\"");
}

#[rstest]
#[case(None, Some("10.0.0.7"), Some("10.0.0.7"))]
#[case(Some("203.0.113.9, 10.0.0.1"), Some("10.0.0.7"), Some("203.0.113.9"))]
#[case(Some("not-an-ip"), Some("10.0.0.7"), Some("10.0.0.7"))]
#[case(Some("2001:db8::1"), None, Some("2001:db8::1"))]
#[case(None, None, None)]
fn client_ip_prefers_first_forwarded_entry(
    #[case] forwarded_for: Option<&str>,
    #[case] remote_addr: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let context = RequestContext {
        remote_addr: remote_addr.map(|raw| raw.parse::<IpAddr>().expect("valid address")),
        forwarded_for: forwarded_for.map(str::to_owned),
    };
    let expected_ip = expected.map(|raw| raw.parse::<IpAddr>().expect("valid address"));

    assert_eq!(context.client_ip(), expected_ip);
}

#[rstest]
fn recorded_event_captures_actor_snapshot_and_ip(admin: StaffMember) {
    let context = RequestContext::from_remote_addr("192.0.2.4".parse().expect("valid address"));
    let entry = AuditEntry::by(&admin, AuditAction::CreateDepartment)
        .on("Department", "Physics")
        .with_detail("Created department Physics");

    let event = AuditEvent::record(entry, &context, &DefaultClock);

    assert_eq!(event.actor_username(), Some("Registrar"));
    assert_eq!(event.actor().map(|actor| actor.id), Some(admin.id()));
    assert_eq!(event.target_model(), Some("Department"));
    assert_eq!(event.target_id(), Some("Physics"));
    assert_eq!(event.detail(), Some("Created department Physics"));
    assert_eq!(event.source_ip(), context.client_ip());
}

#[rstest]
#[case("reg", true)]
#[case("REGISTRAR", true)]
#[case("  gist ", true)]
#[case("dean", false)]
fn actor_filter_is_case_insensitive_substring(
    admin: StaffMember,
    #[case] fragment: &str,
    #[case] expected: bool,
) {
    let event = AuditEvent::record(
        AuditEntry::by(&admin, AuditAction::Login),
        &RequestContext::system(),
        &DefaultClock,
    );

    assert_eq!(AuditFilter::default().actor_contains(fragment).matches(&event), expected);
}

#[rstest]
fn actor_filter_never_matches_anonymous_events() {
    let event = AuditEvent::record(
        AuditEntry::anonymous(AuditAction::LoginFailed),
        &RequestContext::system(),
        &DefaultClock,
    );

    assert!(AuditFilter::default().matches(&event));
    assert!(!AuditFilter::default().actor_contains("a").matches(&event));
    assert!(AuditFilter::default().actor_contains("   ").matches(&event));
}

#[rstest]
fn action_filter_selects_one_code(admin: StaffMember) {
    let event = AuditEvent::record(
        AuditEntry::by(&admin, AuditAction::Logout),
        &RequestContext::system(),
        &DefaultClock,
    );

    assert!(AuditFilter::default().with_action(AuditAction::Logout).matches(&event));
    assert!(!AuditFilter::default().with_action(AuditAction::Login).matches(&event));
}
