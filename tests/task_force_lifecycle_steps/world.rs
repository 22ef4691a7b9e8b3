//! Shared world state for task force lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tfms::audit::adapters::memory::InMemoryAuditLog;
use tfms::directory::{
    adapters::memory::InMemoryStaffRepository,
    domain::{DepartmentId, StaffMember},
};
use tfms::notification::adapters::memory::InMemoryOutbox;
use tfms::task_force::{
    adapters::memory::InMemoryTaskForceRepository,
    domain::TaskForce,
    services::{TaskForceLifecycleService, TaskForceServiceError},
};
use tfms::workload::services::WorkloadSettings;

/// Service type used by the BDD world.
pub type TestLifecycleService = TaskForceLifecycleService<
    InMemoryTaskForceRepository,
    InMemoryStaffRepository,
    InMemoryAuditLog,
    InMemoryOutbox,
    DefaultClock,
>;

/// Scenario world for task force lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub service: TestLifecycleService,
    pub staff: Arc<InMemoryStaffRepository>,
    pub audit_log: Arc<InMemoryAuditLog>,
    pub outbox: Arc<InMemoryOutbox>,
    pub department: DepartmentId,
    pub accounts: HashMap<String, StaffMember>,
    pub task_force: Option<TaskForce>,
    pub last_error: Option<TaskForceServiceError>,
}

impl LifecycleWorld {
    /// Creates a world with one department and no accounts.
    #[must_use]
    pub fn new() -> Self {
        let staff = Arc::new(InMemoryStaffRepository::new());
        let audit_log = Arc::new(InMemoryAuditLog::new());
        let outbox = Arc::new(InMemoryOutbox::new());
        let service = TaskForceLifecycleService::new(
            Arc::new(InMemoryTaskForceRepository::new()),
            Arc::clone(&staff),
            Arc::clone(&audit_log),
            Arc::clone(&outbox),
            WorkloadSettings::new(),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            staff,
            audit_log,
            outbox,
            department: DepartmentId::new(),
            accounts: HashMap::new(),
            task_force: None,
            last_error: None,
        }
    }

    /// Returns the account registered under `username`.
    pub fn account(&self, username: &str) -> Result<StaffMember, eyre::Report> {
        self.accounts
            .get(username)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no account named {username} in scenario world"))
    }

    /// Returns the task force under test.
    pub fn current_task_force(&self) -> Result<&TaskForce, eyre::Report> {
        self.task_force
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task force in scenario world"))
    }

    /// Records the outcome of a lifecycle step.
    pub fn record(&mut self, result: Result<TaskForce, TaskForceServiceError>) {
        match result {
            Ok(task_force) => {
                self.task_force = Some(task_force);
                self.last_error = None;
            }
            Err(err) => self.last_error = Some(err),
        }
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
