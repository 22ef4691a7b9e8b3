//! Application services for staff and department administration.

mod accounts;

pub use accounts::{
    CreateStaffRequest, DirectoryService, DirectoryServiceError, DirectoryServiceResult,
};
