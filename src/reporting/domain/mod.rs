//! Report queries and rows.

mod query;
mod report;

pub use query::{StaffWorkloadQuery, parse_department_ids};
pub use report::{StaffWorkloadEntry, StaffWorkloadReport, WorkloadSummary};
