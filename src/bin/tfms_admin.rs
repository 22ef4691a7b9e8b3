//! Administrative reports over a TFMS `PostgreSQL` database.
//!
//! Usage:
//!
//! ```text
//! tfms_admin workload-report <config-path> [role]
//! tfms_admin audit-export <config-path> [actor]
//! ```
//!
//! `workload-report` prints every active staff member's workload status as
//! JSON, optionally restricted to one role code such as `LECTURER`; an
//! unknown code is rejected.
//! `audit-export` prints the audit trail as CSV, optionally restricted to
//! actors whose username contains `actor`. Both read the database URL and
//! workload thresholds from the TOML file at `config-path`.

use camino::{Utf8Path, Utf8PathBuf};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::env;
use std::io::Write;
use std::sync::Arc;
use tfms::audit::{
    adapters::postgres::PostgresAuditLog,
    ports::AuditFilter,
    services::{AuditExportError, AuditTrail},
};
use tfms::config::{ConfigError, TfmsConfig};
use tfms::directory::{adapters::postgres::PostgresStaffRepository, domain::Role};
use tfms::reporting::{
    domain::StaffWorkloadQuery,
    services::{ReportError, ReportService},
};
use tfms::task_force::adapters::postgres::PostgresTaskForceRepository;
use tfms::telemetry::{self, DEFAULT_DIRECTIVE};
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while running an admin command.
#[derive(Debug, Error)]
enum AdminError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to connect to the database: {0}")]
    Connect(#[source] diesel::r2d2::PoolError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Export(#[from] AuditExportError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    WorkloadReport {
        config: Utf8PathBuf,
        role: Option<Role>,
    },
    AuditExport {
        config: Utf8PathBuf,
        actor: Option<String>,
    },
}

impl Command {
    fn config_path(&self) -> &Utf8Path {
        match self {
            Self::WorkloadReport { config, .. } | Self::AuditExport { config, .. } => config,
        }
    }
}

fn main() -> Result<(), BoxError> {
    telemetry::init(DEFAULT_DIRECTIVE)?;
    let args = collect_args()?;
    let command = parse_args(args.into_iter())?;
    let output = run(&command)?;
    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .map_err(AdminError::Output)?;
    Ok(())
}

fn collect_args() -> Result<Vec<String>, AdminError> {
    env::args_os()
        .map(|arg_os| {
            arg_os
                .into_string()
                .map_err(|_| AdminError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, AdminError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| AdminError::InvalidArgs("missing command argument".into()))?;
    let config = args
        .next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| AdminError::InvalidArgs("missing config path argument".into()))?;
    let optional = args.next();
    if let Some(extra) = args.next() {
        return Err(AdminError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    match operation.as_str() {
        "workload-report" => {
            let role = optional
                .as_deref()
                .map(Role::try_from)
                .transpose()
                .map_err(|err| AdminError::InvalidArgs(err.to_string()))?;
            Ok(Command::WorkloadReport { config, role })
        }
        "audit-export" => Ok(Command::AuditExport {
            config,
            actor: optional,
        }),
        other => Err(AdminError::InvalidArgs(format!(
            "unknown command '{other}'; expected workload-report or audit-export"
        ))),
    }
}

fn run(command: &Command) -> Result<String, AdminError> {
    let config = TfmsConfig::load(command.config_path())?;
    let manager = ConnectionManager::<PgConnection>::new(config.database_url()?);
    let pool = Pool::builder().build(manager).map_err(AdminError::Connect)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AdminError::RuntimeInit)?;

    runtime.block_on(execute(command, &config, pool))
}

async fn execute(
    command: &Command,
    config: &TfmsConfig,
    pool: Pool<ConnectionManager<PgConnection>>,
) -> Result<String, AdminError> {
    match command {
        Command::WorkloadReport { role, .. } => {
            let reports = ReportService::new(
                Arc::new(PostgresStaffRepository::new(pool.clone())),
                Arc::new(PostgresTaskForceRepository::new(pool)),
                config.workload_settings()?,
            );
            let query = role.map_or_else(StaffWorkloadQuery::default, |code| {
                StaffWorkloadQuery::default().with_role(code)
            });
            let report = reports.staff_workload(&query).await?;
            info!(rows = report.staff.len(), "workload report generated");
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            Ok(json)
        }
        Command::AuditExport { actor, .. } => {
            let trail = AuditTrail::new(
                Arc::new(PostgresAuditLog::new(pool)),
                Arc::new(DefaultClock),
            );
            let filter = actor
                .as_deref()
                .map_or_else(AuditFilter::default, |fragment| {
                    AuditFilter::default().actor_contains(fragment)
                });
            Ok(trail.export_csv(&filter).await?)
        }
    }
}
