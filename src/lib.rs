//! TFMS: university task-force management.
//!
//! Department heads assemble cross-department task forces, reviewers approve
//! or reject them, and every staff member's aggregate workload is classified
//! against administrator-configured thresholds.
//!
//! # Architecture
//!
//! TFMS follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and delivery
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//! - **Services**: Orchestration of domain rules, audit and notification
//!
//! # Modules
//!
//! - [`directory`]: Staff accounts, departments, roles and login lockout
//! - [`workload`]: Thresholds and the workload evaluator
//! - [`task_force`]: Task force lifecycle
//! - [`audit`]: Append-only audit trail and CSV export
//! - [`notification`]: Email rendering and best-effort delivery
//! - [`reporting`]: Staff workload reports
//! - [`config`]: TOML start-up configuration
//! - [`telemetry`]: Structured logging set-up

pub mod audit;
pub mod config;
pub mod directory;
pub mod notification;
pub mod reporting;
pub mod task_force;
pub mod telemetry;
pub mod workload;
