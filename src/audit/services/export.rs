//! CSV export of the audit trail.

use super::AuditTrail;
use crate::audit::{
    domain::AuditEvent,
    ports::{AuditFilter, AuditLogError, AuditLogRepository},
};
use mockable::Clock;
use std::io;
use thiserror::Error;

/// Header row of exported audit files.
pub const AUDIT_CSV_HEADER: [&str; 7] = [
    "Timestamp",
    "Actor",
    "Action",
    "Target Model",
    "Target ID",
    "Details",
    "IP Address",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SYSTEM_ACTOR: &str = "System";

/// Errors returned while exporting audit events.
#[derive(Debug, Error)]
pub enum AuditExportError {
    /// The audit log could not be read.
    #[error(transparent)]
    Log(#[from] AuditLogError),
    /// Writing a CSV record failed.
    #[error("failed to write audit CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Flushing the CSV writer failed.
    #[error("failed to flush audit CSV: {0}")]
    Io(#[from] io::Error),
    /// The buffered CSV output was not valid UTF-8.
    #[error("audit CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Writes events as CSV rows, header first.
///
/// # Errors
///
/// Returns [`AuditExportError`] when a record cannot be written.
pub fn write_csv<W: io::Write>(events: &[AuditEvent], writer: W) -> Result<(), AuditExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(AUDIT_CSV_HEADER)?;
    for event in events {
        csv_writer.write_record(csv_row(event))?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn csv_row(event: &AuditEvent) -> [String; 7] {
    [
        event.recorded_at().format(TIMESTAMP_FORMAT).to_string(),
        event.actor_username().unwrap_or(SYSTEM_ACTOR).to_owned(),
        event.action().as_str().to_owned(),
        event.target_model().unwrap_or_default().to_owned(),
        event.target_id().unwrap_or_default().to_owned(),
        event.detail().unwrap_or_default().to_owned(),
        event
            .source_ip()
            .map(|ip| ip.to_string())
            .unwrap_or_default(),
    ]
}

impl<A, C> AuditTrail<A, C>
where
    A: AuditLogRepository,
    C: Clock + Send + Sync,
{
    /// Renders the filtered trail as a CSV document, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditExportError`] when the log cannot be read or the CSV
    /// cannot be written.
    pub async fn export_csv(&self, filter: &AuditFilter) -> Result<String, AuditExportError> {
        let events = self.list(filter).await?;
        let mut buffer = Vec::new();
        write_csv(&events, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
