//! Report assembly services.

mod report;

pub use report::{ReportError, ReportResult, ReportService};
