//! `PostgreSQL` implementation of the audit log.

use super::{models::AuditEventRow, schema::audit_events};
use crate::audit::{
    domain::{AuditAction, AuditActor, AuditEvent, AuditEventId, PersistedAuditEvent},
    ports::{AuditFilter, AuditLogError, AuditLogRepository, AuditLogResult},
};
use crate::directory::domain::StaffId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::net::IpAddr;

/// `PostgreSQL` connection pool type used by the audit log.
pub type AuditPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed audit log.
#[derive(Debug, Clone)]
pub struct PostgresAuditLog {
    pool: AuditPgPool,
}

impl PostgresAuditLog {
    /// Creates a new audit log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AuditPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AuditLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AuditLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AuditLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AuditLogError::persistence)?
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLog {
    async fn append(&self, event: &AuditEvent) -> AuditLogResult<()> {
        let event_id = event.id();
        let row = to_row(event);
        self.run_blocking(move |connection| {
            diesel::insert_into(audit_events::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AuditLogError::DuplicateEvent(event_id)
                    }
                    _ => AuditLogError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list(&self, filter: &AuditFilter) -> AuditLogResult<Vec<AuditEvent>> {
        let actor_pattern = filter
            .actor_username_contains
            .as_deref()
            .map(|fragment| format!("%{}%", escape_like(fragment)));
        let action_code = filter.action.map(AuditAction::as_str);

        self.run_blocking(move |connection| {
            let mut query = audit_events::table
                .select(AuditEventRow::as_select())
                .order(audit_events::recorded_at.desc())
                .into_boxed();
            if let Some(pattern) = actor_pattern {
                query = query.filter(audit_events::actor_username.ilike(pattern));
            }
            if let Some(code) = action_code {
                query = query.filter(audit_events::action.eq(code));
            }
            let rows = query
                .load::<AuditEventRow>(connection)
                .map_err(AuditLogError::persistence)?;
            rows.into_iter().map(row_to_event).collect()
        })
        .await
    }
}

fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for character in fragment.chars() {
        if matches!(character, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}

fn to_row(event: &AuditEvent) -> AuditEventRow {
    AuditEventRow {
        id: event.id().into_inner(),
        actor_id: event.actor().map(|actor| actor.id.into_inner()),
        actor_username: event.actor_username().map(str::to_owned),
        action: event.action().as_str().to_owned(),
        target_model: event.target_model().map(str::to_owned),
        target_id: event.target_id().map(str::to_owned),
        detail: event.detail().map(str::to_owned),
        source_ip: event.source_ip().map(|ip| ip.to_string()),
        recorded_at: event.recorded_at(),
    }
}

fn row_to_event(row: AuditEventRow) -> AuditLogResult<AuditEvent> {
    let AuditEventRow {
        id,
        actor_id,
        actor_username,
        action,
        target_model,
        target_id,
        detail,
        source_ip,
        recorded_at,
    } = row;

    let actor = match (actor_id, actor_username) {
        (Some(staff_id), Some(username)) => Some(AuditActor {
            id: StaffId::from_uuid(staff_id),
            username,
        }),
        _ => None,
    };
    let source_ip = source_ip
        .map(|raw| raw.parse::<IpAddr>())
        .transpose()
        .map_err(AuditLogError::invalid_persisted_data)?;

    Ok(AuditEvent::from_persisted(PersistedAuditEvent {
        id: AuditEventId::from_uuid(id),
        actor,
        action: AuditAction::try_from(action.as_str())
            .map_err(AuditLogError::invalid_persisted_data)?,
        target_model,
        target_id,
        detail,
        source_ip,
        recorded_at,
    }))
}
