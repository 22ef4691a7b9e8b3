//! Serializable report rows.

use crate::directory::domain::{StaffId, StaffMember};
use crate::workload::domain::{WorkloadClass, WorkloadStatus};
use serde::Serialize;

/// One staff member's row in the workload report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffWorkloadEntry {
    /// Staff identifier.
    pub id: StaffId,
    /// Full name, or the username when no name is recorded.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Human-readable role label.
    pub role: String,
    /// Current workload classification.
    pub workload: WorkloadStatus,
}

impl StaffWorkloadEntry {
    /// Builds a row for a staff member.
    #[must_use]
    pub fn new(staff: &StaffMember, workload: WorkloadStatus) -> Self {
        Self {
            id: staff.id(),
            name: staff.display_name(),
            email: staff.email().as_str().to_owned(),
            role: staff.role().label().to_owned(),
            workload,
        }
    }
}

/// Workload report envelope, serialized as `{"staff": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StaffWorkloadReport {
    /// Report rows ordered by username.
    pub staff: Vec<StaffWorkloadEntry>,
}

/// Number of staff in each workload class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkloadSummary {
    /// Staff above the maximum.
    pub overloaded: usize,
    /// Staff below the minimum.
    pub underloaded: usize,
    /// Staff within the thresholds.
    pub balanced: usize,
    /// Staff classified without thresholds.
    pub unknown: usize,
}

impl WorkloadSummary {
    /// Counts report rows by classification.
    #[must_use]
    pub fn tally<'a>(entries: impl IntoIterator<Item = &'a StaffWorkloadEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |mut summary, entry| {
                *summary.slot(entry.workload.status) += 1;
                summary
            })
    }

    /// Returns the count for one class.
    #[must_use]
    pub const fn count(&self, class: WorkloadClass) -> usize {
        match class {
            WorkloadClass::Overloaded => self.overloaded,
            WorkloadClass::Underloaded => self.underloaded,
            WorkloadClass::Balanced => self.balanced,
            WorkloadClass::Unknown => self.unknown,
        }
    }

    /// Returns the total number of staff counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.overloaded + self.underloaded + self.balanced + self.unknown
    }

    const fn slot(&mut self, class: WorkloadClass) -> &mut usize {
        match class {
            WorkloadClass::Overloaded => &mut self.overloaded,
            WorkloadClass::Underloaded => &mut self.underloaded,
            WorkloadClass::Balanced => &mut self.balanced,
            WorkloadClass::Unknown => &mut self.unknown,
        }
    }
}
