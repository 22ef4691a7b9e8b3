//! `PostgreSQL` repository implementation for task forces.

use super::{
    models::{TaskForceDepartmentRow, TaskForceMemberRow, TaskForceRow},
    schema::{task_force_departments, task_force_members, task_forces},
};
use crate::directory::domain::{DepartmentId, StaffId};
use crate::task_force::{
    domain::{
        PersistedTaskForceData, TaskForce, TaskForceDetails, TaskForceId, TaskForceName,
        TaskForceStatus,
    },
    ports::{
        TaskForceFilter, TaskForceRepository, TaskForceRepositoryError, TaskForceRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task force adapters.
pub type TaskForcePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task force repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskForceRepository {
    pool: TaskForcePgPool,
}

impl PostgresTaskForceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskForcePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskForceRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskForceRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskForceRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskForceRepositoryError::persistence)?
    }
}

/// Row bundle written for one task force.
struct TaskForceRows {
    task_force: TaskForceRow,
    departments: Vec<TaskForceDepartmentRow>,
    members: Vec<TaskForceMemberRow>,
}

#[async_trait]
impl TaskForceRepository for PostgresTaskForceRepository {
    async fn store(&self, task_force: &TaskForce) -> TaskForceRepositoryResult<()> {
        let task_force_id = task_force.id();
        let rows = to_rows(task_force)?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|tx| {
                    diesel::insert_into(task_forces::table)
                        .values(&rows.task_force)
                        .execute(tx)?;
                    insert_associations(tx, &rows)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskForceRepositoryError::DuplicateTaskForce(task_force_id)
                    }
                    _ => TaskForceRepositoryError::persistence(err),
                })
        })
        .await
    }

    async fn update(&self, task_force: &TaskForce) -> TaskForceRepositoryResult<()> {
        let task_force_id = task_force.id();
        let rows = to_rows(task_force)?;

        self.run_blocking(move |connection| {
            let updated_count = connection
                .transaction::<_, DieselError, _>(|tx| {
                    let id = task_force_id.into_inner();
                    let updated_count =
                        diesel::update(task_forces::table.filter(task_forces::id.eq(id)))
                            .set(&rows.task_force)
                            .execute(tx)?;
                    if updated_count == 0 {
                        return Ok(0);
                    }
                    diesel::delete(
                        task_force_departments::table
                            .filter(task_force_departments::task_force_id.eq(id)),
                    )
                    .execute(tx)?;
                    diesel::delete(
                        task_force_members::table.filter(task_force_members::task_force_id.eq(id)),
                    )
                    .execute(tx)?;
                    insert_associations(tx, &rows)?;
                    Ok(updated_count)
                })
                .map_err(TaskForceRepositoryError::persistence)?;

            if updated_count == 0 {
                return Err(TaskForceRepositoryError::NotFound(task_force_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskForceId) -> TaskForceRepositoryResult<Option<TaskForce>> {
        self.run_blocking(move |connection| {
            let rows = task_forces::table
                .filter(task_forces::id.eq(id.into_inner()))
                .select(TaskForceRow::as_select())
                .load::<TaskForceRow>(connection)
                .map_err(TaskForceRepositoryError::persistence)?;
            Ok(assemble(connection, rows)?.into_iter().next())
        })
        .await
    }

    async fn find_involving(&self, staff: StaffId) -> TaskForceRepositoryResult<Vec<TaskForce>> {
        let staff_uuid = staff.into_inner();
        self.run_blocking(move |connection| {
            let membership_ids = task_force_members::table
                .filter(task_force_members::staff_id.eq(staff_uuid))
                .select(task_force_members::task_force_id);
            let rows = task_forces::table
                .filter(
                    task_forces::id
                        .eq_any(membership_ids)
                        .or(task_forces::chairman_id.eq(staff_uuid)),
                )
                .select(TaskForceRow::as_select())
                .order((task_forces::name.asc(), task_forces::id.asc()))
                .load::<TaskForceRow>(connection)
                .map_err(TaskForceRepositoryError::persistence)?;
            assemble(connection, rows)
        })
        .await
    }

    async fn list(&self, filter: &TaskForceFilter) -> TaskForceRepositoryResult<Vec<TaskForce>> {
        let status_codes: Vec<&'static str> = filter
            .statuses
            .iter()
            .copied()
            .map(TaskForceStatus::as_str)
            .collect();
        let department = filter.department.map(DepartmentId::into_inner);

        self.run_blocking(move |connection| {
            let mut query = task_forces::table
                .select(TaskForceRow::as_select())
                .order((task_forces::name.asc(), task_forces::id.asc()))
                .into_boxed();
            if !status_codes.is_empty() {
                query = query.filter(task_forces::status.eq_any(status_codes));
            }
            if let Some(department_id) = department {
                let associated = task_force_departments::table
                    .filter(task_force_departments::department_id.eq(department_id))
                    .select(task_force_departments::task_force_id);
                query = query.filter(task_forces::id.eq_any(associated));
            }
            let rows = query
                .load::<TaskForceRow>(connection)
                .map_err(TaskForceRepositoryError::persistence)?;
            assemble(connection, rows)
        })
        .await
    }
}

fn insert_associations(connection: &mut PgConnection, rows: &TaskForceRows) -> QueryResult<usize> {
    let departments = diesel::insert_into(task_force_departments::table)
        .values(&rows.departments)
        .execute(connection)?;
    if rows.members.is_empty() {
        return Ok(departments);
    }
    let members = diesel::insert_into(task_force_members::table)
        .values(&rows.members)
        .execute(connection)?;
    Ok(departments.saturating_add(members))
}

/// Loads the association sets for `rows` and rebuilds the aggregates,
/// preserving the row order.
fn assemble(
    connection: &mut PgConnection,
    rows: Vec<TaskForceRow>,
) -> TaskForceRepositoryResult<Vec<TaskForce>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let department_rows = task_force_departments::table
        .filter(task_force_departments::task_force_id.eq_any(ids.clone()))
        .select(TaskForceDepartmentRow::as_select())
        .load::<TaskForceDepartmentRow>(connection)
        .map_err(TaskForceRepositoryError::persistence)?;
    let member_rows = task_force_members::table
        .filter(task_force_members::task_force_id.eq_any(ids))
        .select(TaskForceMemberRow::as_select())
        .load::<TaskForceMemberRow>(connection)
        .map_err(TaskForceRepositoryError::persistence)?;

    let mut departments: HashMap<Uuid, BTreeSet<DepartmentId>> = HashMap::new();
    for row in department_rows {
        departments
            .entry(row.task_force_id)
            .or_default()
            .insert(DepartmentId::from_uuid(row.department_id));
    }
    let mut members: HashMap<Uuid, BTreeSet<StaffId>> = HashMap::new();
    for row in member_rows {
        members
            .entry(row.task_force_id)
            .or_default()
            .insert(StaffId::from_uuid(row.staff_id));
    }

    rows.into_iter()
        .map(|row| {
            let row_departments = departments.remove(&row.id).unwrap_or_default();
            let row_members = members.remove(&row.id).unwrap_or_default();
            row_to_task_force(row, row_departments, row_members)
        })
        .collect()
}

fn to_rows(task_force: &TaskForce) -> TaskForceRepositoryResult<TaskForceRows> {
    let id = task_force.id().into_inner();
    let weightage =
        i32::try_from(task_force.weightage()).map_err(TaskForceRepositoryError::persistence)?;
    Ok(TaskForceRows {
        task_force: TaskForceRow {
            id,
            name: task_force.name().as_str().to_owned(),
            description: task_force.description().map(str::to_owned),
            rejection_reason: task_force.rejection_reason().map(str::to_owned),
            weightage,
            chairman_id: task_force.chairman().map(StaffId::into_inner),
            created_by: task_force.created_by().into_inner(),
            status: task_force.status().as_str().to_owned(),
            created_at: task_force.created_at(),
            updated_at: task_force.updated_at(),
        },
        departments: task_force
            .departments()
            .iter()
            .map(|department| TaskForceDepartmentRow {
                task_force_id: id,
                department_id: department.into_inner(),
            })
            .collect(),
        members: task_force
            .members()
            .iter()
            .map(|member| TaskForceMemberRow {
                task_force_id: id,
                staff_id: member.into_inner(),
            })
            .collect(),
    })
}

fn row_to_task_force(
    row: TaskForceRow,
    departments: BTreeSet<DepartmentId>,
    members: BTreeSet<StaffId>,
) -> TaskForceRepositoryResult<TaskForce> {
    let TaskForceRow {
        id,
        name,
        description,
        rejection_reason,
        weightage,
        chairman_id,
        created_by,
        status,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskForceData {
        id: TaskForceId::from_uuid(id),
        details: TaskForceDetails {
            name: TaskForceName::new(name)
                .map_err(TaskForceRepositoryError::invalid_persisted_data)?,
            description,
            departments,
            weightage: u32::try_from(weightage)
                .map_err(TaskForceRepositoryError::invalid_persisted_data)?,
        },
        rejection_reason,
        members,
        chairman: chairman_id.map(StaffId::from_uuid),
        created_by: StaffId::from_uuid(created_by),
        status: TaskForceStatus::try_from(status.as_str())
            .map_err(TaskForceRepositoryError::invalid_persisted_data)?,
        created_at,
        updated_at,
    };
    Ok(TaskForce::from_persisted(data))
}
