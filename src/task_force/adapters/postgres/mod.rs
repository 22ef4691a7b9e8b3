//! `PostgreSQL` adapters for task force persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskForceRepository, TaskForcePgPool};
