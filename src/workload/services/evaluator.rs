//! Workload aggregation and classification.

use crate::directory::domain::StaffId;
use crate::task_force::ports::{TaskForceRepository, TaskForceRepositoryError};
use crate::workload::domain::WorkloadStatus;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

use super::WorkloadSettings;

/// Errors returned while evaluating workload.
#[derive(Debug, Error)]
pub enum WorkloadEvaluationError {
    /// Task forces could not be loaded.
    #[error(transparent)]
    Repository(#[from] TaskForceRepositoryError),
}

/// Result type for workload evaluation.
pub type WorkloadEvaluationResult<T> = Result<T, WorkloadEvaluationError>;

/// Predicted status of a candidate member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipPreview {
    /// Candidate staff member.
    pub staff: StaffId,
    /// Status with the candidate task force's weightage added.
    pub workload: WorkloadStatus,
}

/// Computes and classifies staff workload.
///
/// Reads only; never mutates task forces or settings.
#[derive(Clone)]
pub struct WorkloadEvaluator<R>
where
    R: TaskForceRepository,
{
    task_forces: Arc<R>,
    settings: WorkloadSettings,
}

impl<R> WorkloadEvaluator<R>
where
    R: TaskForceRepository,
{
    /// Creates a new evaluator.
    #[must_use]
    pub const fn new(task_forces: Arc<R>, settings: WorkloadSettings) -> Self {
        Self {
            task_forces,
            settings,
        }
    }

    /// Returns the settings handle the evaluator classifies against.
    #[must_use]
    pub const fn settings(&self) -> &WorkloadSettings {
        &self.settings
    }

    /// Sums the weightage of every counted task force the staff member
    /// belongs to as member or chairman.
    ///
    /// Draft, active, submitted and approved task forces count. Each task
    /// force counts once however the staff member is related to it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadEvaluationError::Repository`] when task forces
    /// cannot be loaded.
    pub async fn calculate_workload(&self, staff: StaffId) -> WorkloadEvaluationResult<u32> {
        let involved = self.task_forces.find_involving(staff).await?;
        let mut seen = HashSet::with_capacity(involved.len());
        let total = involved
            .iter()
            .filter(|task_force| task_force.status().counts_toward_workload())
            .filter(|task_force| seen.insert(task_force.id()))
            .fold(0_u32, |sum, task_force| {
                sum.saturating_add(task_force.weightage())
            });
        Ok(total)
    }

    /// Classifies the staff member's workload with `additional_weightage`
    /// added to the current total.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadEvaluationError::Repository`] when task forces
    /// cannot be loaded.
    pub async fn get_workload_status(
        &self,
        staff: StaffId,
        additional_weightage: u32,
    ) -> WorkloadEvaluationResult<WorkloadStatus> {
        let current = self.calculate_workload(staff).await?;
        let predicted = current.saturating_add(additional_weightage);
        Ok(WorkloadStatus::classify(predicted, self.settings.current()))
    }

    /// Previews each candidate's status as if they joined a task force of
    /// the given weightage.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadEvaluationError::Repository`] when task forces
    /// cannot be loaded.
    pub async fn preview_membership(
        &self,
        candidates: &[StaffId],
        weightage: u32,
    ) -> WorkloadEvaluationResult<Vec<MembershipPreview>> {
        let mut previews = Vec::with_capacity(candidates.len());
        for &staff in candidates {
            let workload = self.get_workload_status(staff, weightage).await?;
            previews.push(MembershipPreview { staff, workload });
        }
        Ok(previews)
    }
}
