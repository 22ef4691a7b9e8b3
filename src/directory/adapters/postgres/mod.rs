//! `PostgreSQL` adapters for staff directory persistence.

mod models;
mod repository;
mod schema;

pub use repository::{DirectoryPgPool, PostgresDepartmentRepository, PostgresStaffRepository};
