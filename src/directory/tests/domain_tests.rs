//! Tests for directory values, roles and the staff aggregate.

use crate::directory::domain::{
    Dashboard, DepartmentId, DepartmentName, DirectoryDomainError, EmailAddress,
    LoginFailureOutcome, NewStaffMember, PasswordPolicy, PasswordPolicyError, Role, StaffMember,
    Username,
};
use mockable::DefaultClock;
use rstest::rstest;

fn new_staff(
    role: Role,
    department: Option<DepartmentId>,
) -> Result<StaffMember, DirectoryDomainError> {
    StaffMember::new(
        NewStaffMember {
            username: Username::new("jdoe").expect("valid username"),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            email: EmailAddress::new("jdoe@Uni.Example").expect("valid email"),
            role,
            department,
        },
        &DefaultClock,
    )
}

#[rstest]
#[case("")]
#[case("   ")]
fn username_rejects_blank_values(#[case] raw: &str) {
    assert_eq!(Username::new(raw), Err(DirectoryDomainError::EmptyUsername));
}

#[rstest]
fn username_rejects_inner_whitespace() {
    assert!(matches!(
        Username::new("j doe"),
        Err(DirectoryDomainError::InvalidUsername(_))
    ));
}

#[rstest]
fn username_is_trimmed() {
    let username = Username::new("  jdoe ").expect("valid username");
    assert_eq!(username.as_str(), "jdoe");
}

#[rstest]
#[case("jdoe@uni.example", true)]
#[case("jdoe@UNI.Example", true)]
#[case("jdoe", false)]
#[case("@uni.example", false)]
#[case("jdoe@localhost", false)]
#[case("a@b@c.example", false)]
#[case("j doe@uni.example", false)]
fn email_address_validates_shape(#[case] raw: &str, #[case] valid: bool) {
    assert_eq!(EmailAddress::new(raw).is_ok(), valid);
}

#[rstest]
fn email_address_lowercases_domain_only() {
    let email = EmailAddress::new("JDoe@UNI.Example").expect("valid email");
    assert_eq!(email.as_str(), "JDoe@uni.example");
}

#[rstest]
fn department_name_enforces_length_limit() {
    assert!(DepartmentName::new("x".repeat(100)).is_ok());
    assert!(matches!(
        DepartmentName::new("x".repeat(101)),
        Err(DirectoryDomainError::DepartmentNameTooLong(_))
    ));
    assert_eq!(
        DepartmentName::new(" "),
        Err(DirectoryDomainError::EmptyDepartmentName)
    );
}

#[rstest]
#[case(Role::Admin, "ADMIN", Dashboard::Admin)]
#[case(Role::HeadOfDepartment, "HOD", Dashboard::HeadOfDepartment)]
#[case(Role::ProjectManager, "PSM", Dashboard::Review)]
#[case(Role::Dean, "DEAN", Dashboard::Dean)]
#[case(Role::Lecturer, "LECTURER", Dashboard::Lecturer)]
fn role_codes_and_dashboards(#[case] role: Role, #[case] code: &str, #[case] dashboard: Dashboard) {
    assert_eq!(role.as_str(), code);
    assert_eq!(Role::try_from(code.to_ascii_lowercase().as_str()), Ok(role));
    assert_eq!(role.dashboard(), dashboard);
    assert!(role.dashboard().path().starts_with("/dashboard/"));
}

#[rstest]
#[case(Role::Lecturer)]
#[case(Role::HeadOfDepartment)]
fn department_bound_roles_require_department(#[case] role: Role) {
    assert_eq!(
        new_staff(role, None),
        Err(DirectoryDomainError::DepartmentRequired(role))
    );
}

#[rstest]
#[case(Role::Admin)]
#[case(Role::ProjectManager)]
#[case(Role::Dean)]
fn other_roles_have_department_cleared(#[case] role: Role) {
    let staff = new_staff(role, Some(DepartmentId::new())).expect("valid staff member");
    assert_eq!(staff.department(), None);
}

#[rstest]
#[case(Role::Admin, true, false, false, false)]
#[case(Role::HeadOfDepartment, false, true, false, true)]
#[case(Role::ProjectManager, false, false, true, true)]
#[case(Role::Dean, false, false, false, true)]
#[case(Role::Lecturer, false, false, false, true)]
fn role_capabilities(
    #[case] role: Role,
    #[case] administers: bool,
    #[case] assembles: bool,
    #[case] reviews: bool,
    #[case] joins: bool,
) {
    assert_eq!(role.can_administer(), administers);
    assert_eq!(role.can_assemble_task_forces(), assembles);
    assert_eq!(role.can_review(), reviews);
    assert_eq!(role.can_join_task_forces(), joins);
}

#[rstest]
fn new_accounts_must_change_password() {
    let staff = new_staff(Role::Dean, None).expect("valid staff member");
    assert!(staff.must_change_password());
    assert!(staff.can_act());
    assert_eq!(staff.display_name(), "Jane Doe");
}

#[rstest]
fn third_failed_login_locks_account() {
    let mut staff = new_staff(Role::Lecturer, Some(DepartmentId::new())).expect("valid staff");

    let outcomes: Vec<LoginFailureOutcome> = (0..4)
        .map(|_| staff.record_failed_login(3, &DefaultClock))
        .collect();

    assert_eq!(
        outcomes,
        vec![
            LoginFailureOutcome::Counted { attempts: 1 },
            LoginFailureOutcome::Counted { attempts: 2 },
            LoginFailureOutcome::LockedNow,
            LoginFailureOutcome::AlreadyLocked,
        ]
    );
    assert!(staff.is_locked());
    assert_eq!(
        staff.record_successful_login(&DefaultClock),
        Err(DirectoryDomainError::AccountLocked(staff.id()))
    );
}

#[rstest]
fn admin_accounts_are_exempt_from_lockout() {
    let mut staff = new_staff(Role::Admin, None).expect("valid staff member");

    for _ in 0..5 {
        assert_eq!(
            staff.record_failed_login(3, &DefaultClock),
            LoginFailureOutcome::Exempt
        );
    }
    assert!(!staff.is_locked());
    assert_eq!(staff.record_successful_login(&DefaultClock), Ok(()));
}

#[rstest]
fn unlock_resets_counter() {
    let mut staff = new_staff(Role::Dean, None).expect("valid staff member");
    staff.record_failed_login(1, &DefaultClock);
    assert!(staff.is_locked());

    staff.unlock(&DefaultClock);

    assert!(!staff.is_locked());
    assert_eq!(staff.failed_login_attempts(), 0);
}

#[rstest]
fn inactive_accounts_cannot_sign_in() {
    let mut staff = new_staff(Role::Dean, None).expect("valid staff member");
    staff.deactivate(&DefaultClock);

    assert_eq!(
        staff.record_successful_login(&DefaultClock),
        Err(DirectoryDomainError::AccountInactive(staff.id()))
    );
}

#[rstest]
#[case("abc123", Ok(()))]
#[case("abcdefghijklmn12", Ok(()))]
#[case("abcdefghijklmno12", Err(PasswordPolicyError::TooLong { max_length: 16 }))]
#[case("abcdef", Err(PasswordPolicyError::MissingLetterOrDigit))]
#[case("123456", Err(PasswordPolicyError::MissingLetterOrDigit))]
fn password_policy_checks_length_and_composition(
    #[case] candidate: &str,
    #[case] expected: Result<(), PasswordPolicyError>,
) {
    assert_eq!(PasswordPolicy::default().check(candidate), expected);
}
