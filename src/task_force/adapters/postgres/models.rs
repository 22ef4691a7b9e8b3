//! Diesel row models for task force persistence.

use super::schema::{task_force_departments, task_force_members, task_forces};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row and insert model for task force records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = task_forces)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskForceRow {
    /// Internal task force identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Reason given on the latest rejection.
    pub rejection_reason: Option<String>,
    /// Workload weightage.
    pub weightage: i32,
    /// Optional chairman.
    pub chairman_id: Option<uuid::Uuid>,
    /// Creating account.
    pub created_by: uuid::Uuid,
    /// Lifecycle status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task force to department association row.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_force_departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskForceDepartmentRow {
    /// Owning task force.
    pub task_force_id: uuid::Uuid,
    /// Associated department.
    pub department_id: uuid::Uuid,
}

/// Task force membership row.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_force_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskForceMemberRow {
    /// Owning task force.
    pub task_force_id: uuid::Uuid,
    /// Member staff account.
    pub staff_id: uuid::Uuid,
}
