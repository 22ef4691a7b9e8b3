//! Start-up configuration for TFMS.
//!
//! Configuration is read once from a TOML file:
//!
//! ```toml
//! [workload]
//! min = 5
//! max = 20
//!
//! [security]
//! max_failed_logins = 3
//!
//! [security.password]
//! max_length = 16
//!
//! [database]
//! url = "postgres://tfms@localhost/tfms"
//! ```
//!
//! Every section is optional. Without `[workload]` thresholds the workload
//! evaluator reports `UNKNOWN`.

mod settings;

pub use settings::{ConfigError, DatabaseConfig, TfmsConfig, WorkloadConfig};

#[cfg(test)]
mod tests;
