//! Port contracts for the staff directory.

pub mod repository;

pub use repository::{
    DepartmentRepository, DirectoryRepositoryError, DirectoryRepositoryResult, StaffFilter,
    StaffRepository,
};
