//! Workload report assembly.

use crate::directory::{
    domain::StaffId,
    ports::{DirectoryRepositoryError, StaffFilter, StaffRepository},
};
use crate::reporting::domain::{
    StaffWorkloadEntry, StaffWorkloadQuery, StaffWorkloadReport, WorkloadSummary,
};
use crate::task_force::{
    domain::TaskForce,
    ports::{TaskForceRepository, TaskForceRepositoryError},
};
use crate::workload::services::{WorkloadEvaluationError, WorkloadEvaluator, WorkloadSettings};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned while assembling reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Staff could not be listed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
    /// Task forces could not be loaded.
    #[error(transparent)]
    TaskForces(#[from] TaskForceRepositoryError),
    /// Workload could not be evaluated.
    #[error(transparent)]
    Workload(#[from] WorkloadEvaluationError),
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Read-only report service.
#[derive(Clone)]
pub struct ReportService<S, R>
where
    S: StaffRepository,
    R: TaskForceRepository,
{
    staff: Arc<S>,
    task_forces: Arc<R>,
    evaluator: WorkloadEvaluator<R>,
}

impl<S, R> ReportService<S, R>
where
    S: StaffRepository,
    R: TaskForceRepository,
{
    /// Creates a report service.
    #[must_use]
    pub fn new(staff: Arc<S>, task_forces: Arc<R>, settings: WorkloadSettings) -> Self {
        Self {
            evaluator: WorkloadEvaluator::new(Arc::clone(&task_forces), settings),
            staff,
            task_forces,
        }
    }

    /// Lists active staff matching the query with their workload status.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when staff or task forces cannot be loaded.
    pub async fn staff_workload(
        &self,
        query: &StaffWorkloadQuery,
    ) -> ReportResult<StaffWorkloadReport> {
        let mut filter = StaffFilter::active().in_departments(query.departments.iter().copied());
        if let Some(role) = query.role {
            filter = filter.with_role(role);
        }
        let members = self.staff.list(&filter).await?;
        debug!(count = members.len(), "building staff workload report");

        let mut staff = Vec::with_capacity(members.len());
        for member in &members {
            let workload = self.evaluator.get_workload_status(member.id(), 0).await?;
            staff.push(StaffWorkloadEntry::new(member, workload));
        }
        Ok(StaffWorkloadReport { staff })
    }

    /// Counts active staff matching the query per workload class.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] when staff or task forces cannot be loaded.
    pub async fn workload_summary(
        &self,
        query: &StaffWorkloadQuery,
    ) -> ReportResult<WorkloadSummary> {
        let report = self.staff_workload(query).await?;
        Ok(WorkloadSummary::tally(&report.staff))
    }

    /// Lists the task forces a staff member belongs to as member or
    /// chairman, in any status.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TaskForces`] when the lookup fails.
    pub async fn assignments(&self, staff: StaffId) -> ReportResult<Vec<TaskForce>> {
        Ok(self.task_forces.find_involving(staff).await?)
    }
}
