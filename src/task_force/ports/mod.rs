//! Port contracts for task force persistence.

pub mod repository;

pub use repository::{
    TaskForceFilter, TaskForceRepository, TaskForceRepositoryError, TaskForceRepositoryResult,
};
