//! Shared world state for workload evaluation BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tfms::audit::{adapters::memory::InMemoryAuditLog, services::AuditTrail};
use tfms::directory::domain::{EmailAddress, NewStaffMember, Role, StaffId, StaffMember, Username};
use tfms::task_force::adapters::memory::InMemoryTaskForceRepository;
use tfms::workload::services::{
    WorkloadEvaluator, WorkloadSettings, WorkloadSettingsError, WorkloadSettingsService,
};

/// Scenario world for workload behaviour tests.
pub struct WorkloadWorld {
    pub task_forces: Arc<InMemoryTaskForceRepository>,
    pub evaluator: WorkloadEvaluator<InMemoryTaskForceRepository>,
    pub settings_service: WorkloadSettingsService<InMemoryAuditLog, DefaultClock>,
    pub admin: StaffMember,
    pub staff: HashMap<String, StaffId>,
    pub last_settings_error: Option<WorkloadSettingsError>,
}

impl WorkloadWorld {
    /// Creates a world without thresholds or task forces.
    ///
    /// # Panics
    ///
    /// Panics if the built-in administrator account is invalid.
    #[must_use]
    pub fn new() -> Self {
        let settings = WorkloadSettings::new();
        let task_forces = Arc::new(InMemoryTaskForceRepository::new());
        let audit = AuditTrail::new(Arc::new(InMemoryAuditLog::new()), Arc::new(DefaultClock));
        let admin = StaffMember::new(
            NewStaffMember {
                username: Username::new("admin").expect("valid username"),
                first_name: "Ada".to_owned(),
                last_name: String::new(),
                email: EmailAddress::new("admin@uni.example").expect("valid email"),
                role: Role::Admin,
                department: None,
            },
            &DefaultClock,
        )
        .expect("valid admin");

        Self {
            evaluator: WorkloadEvaluator::new(Arc::clone(&task_forces), settings.clone()),
            settings_service: WorkloadSettingsService::new(settings, audit),
            task_forces,
            admin,
            staff: HashMap::new(),
            last_settings_error: None,
        }
    }

    /// Returns the staff identifier registered under `username`.
    pub fn staff_id(&self, username: &str) -> Result<StaffId, eyre::Report> {
        self.staff
            .get(username)
            .copied()
            .ok_or_else(|| eyre::eyre!("no staff member named {username} in scenario world"))
    }
}

impl Default for WorkloadWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkloadWorld {
    WorkloadWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
