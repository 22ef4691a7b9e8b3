//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tfms::audit::{adapters::memory::InMemoryAuditLog, domain::RequestContext, services::AuditTrail};
use tfms::directory::{
    adapters::memory::{InMemoryDepartmentRepository, InMemoryStaffRepository},
    domain::{Department, EmailAddress, NewStaffMember, Role, StaffMember, Username},
    ports::StaffRepository,
    services::{CreateStaffRequest, DirectoryService},
};
use tfms::notification::adapters::memory::InMemoryOutbox;
use tfms::reporting::services::ReportService;
use tfms::task_force::{
    adapters::memory::InMemoryTaskForceRepository, services::TaskForceLifecycleService,
};
use tfms::workload::services::{WorkloadEvaluator, WorkloadSettings, WorkloadSettingsService};

/// Directory service over in-memory adapters.
pub type Directory = DirectoryService<
    InMemoryStaffRepository,
    InMemoryDepartmentRepository,
    InMemoryAuditLog,
    DefaultClock,
>;

/// Lifecycle service over in-memory adapters.
pub type Lifecycle = TaskForceLifecycleService<
    InMemoryTaskForceRepository,
    InMemoryStaffRepository,
    InMemoryAuditLog,
    InMemoryOutbox,
    DefaultClock,
>;

/// Every service wired over one set of in-memory adapters.
pub struct Campus {
    pub directory: Directory,
    pub lifecycle: Lifecycle,
    pub evaluator: WorkloadEvaluator<InMemoryTaskForceRepository>,
    pub settings: WorkloadSettingsService<InMemoryAuditLog, DefaultClock>,
    pub reports: ReportService<InMemoryStaffRepository, InMemoryTaskForceRepository>,
    pub audit: AuditTrail<InMemoryAuditLog, DefaultClock>,
    pub outbox: Arc<InMemoryOutbox>,
    pub admin: StaffMember,
}

/// Provides a campus with a seeded administrator and no thresholds.
///
/// # Panics
///
/// Panics if the seeded administrator cannot be stored.
#[fixture]
pub async fn campus() -> Campus {
    let clock = Arc::new(DefaultClock);
    let staff = Arc::new(InMemoryStaffRepository::new());
    let task_forces = Arc::new(InMemoryTaskForceRepository::new());
    let audit_log = Arc::new(InMemoryAuditLog::new());
    let outbox = Arc::new(InMemoryOutbox::new());
    let workload = WorkloadSettings::new();
    let audit = AuditTrail::new(Arc::clone(&audit_log), Arc::clone(&clock));

    let admin = StaffMember::new(
        NewStaffMember {
            username: Username::new("admin").expect("valid username"),
            first_name: "Ada".to_owned(),
            last_name: "Min".to_owned(),
            email: EmailAddress::new("admin@uni.example").expect("valid email"),
            role: Role::Admin,
            department: None,
        },
        clock.as_ref(),
    )
    .expect("valid admin");
    staff.store(&admin).await.expect("admin stored");

    Campus {
        directory: DirectoryService::new(
            Arc::clone(&staff),
            Arc::new(InMemoryDepartmentRepository::new()),
            Arc::clone(&audit_log),
            Arc::clone(&clock),
        ),
        lifecycle: TaskForceLifecycleService::new(
            Arc::clone(&task_forces),
            Arc::clone(&staff),
            Arc::clone(&audit_log),
            Arc::clone(&outbox),
            workload.clone(),
            Arc::clone(&clock),
        ),
        evaluator: WorkloadEvaluator::new(Arc::clone(&task_forces), workload.clone()),
        settings: WorkloadSettingsService::new(
            workload.clone(),
            AuditTrail::new(Arc::clone(&audit_log), Arc::clone(&clock)),
        ),
        reports: ReportService::new(staff, task_forces, workload),
        audit,
        outbox,
        admin,
    }
}

impl Campus {
    /// Creates a department as the administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the department.
    pub async fn department(&self, name: &str) -> Result<Department, eyre::Report> {
        Ok(self
            .directory
            .create_department(&self.admin, name, &RequestContext::system())
            .await?)
    }

    /// Creates a staff account as the administrator.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory rejects the account.
    pub async fn hire(
        &self,
        username: &str,
        role: Role,
        department: &Department,
    ) -> Result<StaffMember, eyre::Report> {
        let request = CreateStaffRequest::new(
            username,
            username,
            format!("{username}@uni.example"),
            role,
        )
        .with_department(department.id());
        Ok(self
            .directory
            .create_staff(&self.admin, request, &RequestContext::system())
            .await?)
    }
}
