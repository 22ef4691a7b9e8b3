//! `PostgreSQL` repository implementations for the staff directory.

use super::{
    models::{DepartmentRow, StaffRow},
    schema::{departments, staff_members},
};
use crate::directory::{
    domain::{
        Department, DepartmentId, DepartmentName, EmailAddress, PersistedStaffData, Role,
        StaffId, StaffMember, Username,
    },
    ports::{
        DepartmentRepository, DirectoryRepositoryError, DirectoryRepositoryResult, StaffFilter,
        StaffRepository,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

const USERNAME_UNIQUE_CONSTRAINT: &str = "staff_members_username_key";

async fn run_blocking<F, T>(pool: &DirectoryPgPool, f: F) -> DirectoryRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> DirectoryRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let owned_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = owned_pool
            .get()
            .map_err(DirectoryRepositoryError::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(DirectoryRepositoryError::persistence)?
}

/// `PostgreSQL`-backed staff repository.
#[derive(Debug, Clone)]
pub struct PostgresStaffRepository {
    pool: DirectoryPgPool,
}

impl PostgresStaffRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffRepository for PostgresStaffRepository {
    async fn store(&self, staff: &StaffMember) -> DirectoryRepositoryResult<()> {
        let staff_id = staff.id();
        let username = staff.username().clone();
        let row = to_staff_row(staff)?;

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(staff_members::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some(USERNAME_UNIQUE_CONSTRAINT) =>
                    {
                        DirectoryRepositoryError::DuplicateUsername(username.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateStaff(staff_id)
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, staff: &StaffMember) -> DirectoryRepositoryResult<()> {
        let staff_id = staff.id();
        let username = staff.username().clone();
        let row = to_staff_row(staff)?;

        run_blocking(&self.pool, move |connection| {
            let updated_count = diesel::update(
                staff_members::table.filter(staff_members::id.eq(staff_id.into_inner())),
            )
            .set(&row)
            .execute(connection)
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DirectoryRepositoryError::DuplicateUsername(username.clone())
                }
                _ => DirectoryRepositoryError::persistence(err),
            })?;

            if updated_count == 0 {
                return Err(DirectoryRepositoryError::StaffNotFound(staff_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: StaffId) -> DirectoryRepositoryResult<Option<StaffMember>> {
        run_blocking(&self.pool, move |connection| {
            let row = staff_members::table
                .filter(staff_members::id.eq(id.into_inner()))
                .select(StaffRow::as_select())
                .first::<StaffRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_staff).transpose()
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> DirectoryRepositoryResult<Option<StaffMember>> {
        let username_value = username.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = staff_members::table
                .filter(staff_members::username.eq(&username_value))
                .select(StaffRow::as_select())
                .first::<StaffRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_staff).transpose()
        })
        .await
    }

    async fn list(&self, filter: &StaffFilter) -> DirectoryRepositoryResult<Vec<StaffMember>> {
        let department_ids: Vec<uuid::Uuid> = filter
            .departments
            .iter()
            .copied()
            .map(DepartmentId::into_inner)
            .collect();
        let role_code = filter.role.map(Role::as_str);
        let active_only = filter.active_only;

        run_blocking(&self.pool, move |connection| {
            let mut query = staff_members::table
                .select(StaffRow::as_select())
                .order(staff_members::username.asc())
                .into_boxed();
            if !department_ids.is_empty() {
                query = query.filter(staff_members::department_id.eq_any(department_ids));
            }
            if let Some(code) = role_code {
                query = query.filter(staff_members::role.eq(code));
            }
            if active_only {
                query = query.filter(staff_members::is_active.eq(true));
            }
            let rows = query
                .load::<StaffRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_staff).collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed department repository.
#[derive(Debug, Clone)]
pub struct PostgresDepartmentRepository {
    pool: DirectoryPgPool,
}

impl PostgresDepartmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PostgresDepartmentRepository {
    async fn store(&self, department: &Department) -> DirectoryRepositoryResult<()> {
        let name = department.name().clone();
        let row = DepartmentRow {
            id: department.id().into_inner(),
            name: department.name().as_str().to_owned(),
            created_at: department.created_at(),
        };

        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(departments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DirectoryRepositoryError::DuplicateDepartmentName(name.clone())
                    }
                    _ => DirectoryRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: DepartmentId) -> DirectoryRepositoryResult<Option<Department>> {
        run_blocking(&self.pool, move |connection| {
            let row = departments::table
                .filter(departments::id.eq(id.into_inner()))
                .select(DepartmentRow::as_select())
                .first::<DepartmentRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_department).transpose()
        })
        .await
    }

    async fn find_by_name(
        &self,
        name: &DepartmentName,
    ) -> DirectoryRepositoryResult<Option<Department>> {
        let name_value = name.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            let row = departments::table
                .filter(departments::name.eq(&name_value))
                .select(DepartmentRow::as_select())
                .first::<DepartmentRow>(connection)
                .optional()
                .map_err(DirectoryRepositoryError::persistence)?;
            row.map(row_to_department).transpose()
        })
        .await
    }

    async fn list_all(&self) -> DirectoryRepositoryResult<Vec<Department>> {
        run_blocking(&self.pool, move |connection| {
            let rows = departments::table
                .select(DepartmentRow::as_select())
                .order(departments::name.asc())
                .load::<DepartmentRow>(connection)
                .map_err(DirectoryRepositoryError::persistence)?;
            rows.into_iter().map(row_to_department).collect()
        })
        .await
    }
}

fn to_staff_row(staff: &StaffMember) -> DirectoryRepositoryResult<StaffRow> {
    let failed_login_attempts = i32::try_from(staff.failed_login_attempts())
        .map_err(DirectoryRepositoryError::persistence)?;
    Ok(StaffRow {
        id: staff.id().into_inner(),
        username: staff.username().as_str().to_owned(),
        first_name: staff.first_name().to_owned(),
        last_name: staff.last_name().to_owned(),
        email: staff.email().as_str().to_owned(),
        role: staff.role().as_str().to_owned(),
        department_id: staff.department().map(DepartmentId::into_inner),
        is_active: staff.is_active(),
        is_locked: staff.is_locked(),
        failed_login_attempts,
        must_change_password: staff.must_change_password(),
        created_at: staff.created_at(),
        updated_at: staff.updated_at(),
    })
}

fn row_to_staff(row: StaffRow) -> DirectoryRepositoryResult<StaffMember> {
    let StaffRow {
        id,
        username,
        first_name,
        last_name,
        email,
        role,
        department_id,
        is_active,
        is_locked,
        failed_login_attempts,
        must_change_password,
        created_at,
        updated_at,
    } = row;

    let data = PersistedStaffData {
        id: StaffId::from_uuid(id),
        username: Username::new(username)
            .map_err(DirectoryRepositoryError::invalid_persisted_data)?,
        first_name,
        last_name,
        email: EmailAddress::new(email).map_err(DirectoryRepositoryError::invalid_persisted_data)?,
        role: Role::try_from(role.as_str())
            .map_err(DirectoryRepositoryError::invalid_persisted_data)?,
        department: department_id.map(DepartmentId::from_uuid),
        active: is_active,
        locked: is_locked,
        failed_login_attempts: u32::try_from(failed_login_attempts)
            .map_err(DirectoryRepositoryError::invalid_persisted_data)?,
        must_change_password,
        created_at,
        updated_at,
    };
    Ok(StaffMember::from_persisted(data))
}

fn row_to_department(row: DepartmentRow) -> DirectoryRepositoryResult<Department> {
    let name =
        DepartmentName::new(row.name).map_err(DirectoryRepositoryError::invalid_persisted_data)?;
    Ok(Department::from_persisted(
        DepartmentId::from_uuid(row.id),
        name,
        row.created_at,
    ))
}
