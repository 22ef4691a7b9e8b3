//! Diesel row models for staff directory persistence.

use super::schema::{departments, staff_members};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row and insert model for department records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = departments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DepartmentRow {
    /// Internal department identifier.
    pub id: uuid::Uuid,
    /// Unique department name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row and insert model for staff records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = staff_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct StaffRow {
    /// Internal staff identifier.
    pub id: uuid::Uuid,
    /// Unique sign-in name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Notification address.
    pub email: String,
    /// Role code.
    pub role: String,
    /// Optional department affiliation.
    pub department_id: Option<uuid::Uuid>,
    /// Active flag.
    pub is_active: bool,
    /// Locked flag.
    pub is_locked: bool,
    /// Consecutive failed sign-in attempts.
    pub failed_login_attempts: i32,
    /// Forced password change flag.
    pub must_change_password: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
