//! In-memory directory adapters for tests and local tooling.

mod department;
mod staff;

pub use department::InMemoryDepartmentRepository;
pub use staff::InMemoryStaffRepository;
