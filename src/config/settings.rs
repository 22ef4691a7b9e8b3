//! Configuration file model and loading.

use crate::directory::domain::SecurityPolicy;
use crate::workload::{
    domain::{WorkloadDomainError, WorkloadThresholds},
    services::WorkloadSettings,
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(Box<toml::de::Error>),
    /// Only one of the workload bounds was supplied.
    #[error("workload thresholds need both min and max")]
    IncompleteThresholds,
    /// The workload bounds are invalid.
    #[error(transparent)]
    Thresholds(#[from] WorkloadDomainError),
    /// No database URL was configured.
    #[error("database url is not configured")]
    MissingDatabaseUrl,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(Box::new(err))
    }
}

/// `[workload]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Minimum acceptable workload.
    pub min: Option<u32>,
    /// Maximum acceptable workload.
    pub max: Option<u32>,
}

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: Option<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfmsConfig {
    /// Workload thresholds.
    pub workload: WorkloadConfig,
    /// Account security policy.
    pub security: SecurityPolicy,
    /// Database connection.
    pub database: DatabaseConfig,
}

impl TfmsConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid
    /// configuration.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not valid configuration.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| read_error(std::io::Error::other("path must include a file name")))?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let contents = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_toml(&contents)
    }

    /// Returns the validated workload thresholds, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IncompleteThresholds`] when only one bound is
    /// set and [`ConfigError::Thresholds`] when the bounds are invalid.
    pub fn thresholds(&self) -> Result<Option<WorkloadThresholds>, ConfigError> {
        match (self.workload.min, self.workload.max) {
            (Some(min), Some(max)) => Ok(Some(WorkloadThresholds::new(min, max)?)),
            (None, None) => Ok(None),
            (Some(_), None) | (None, Some(_)) => Err(ConfigError::IncompleteThresholds),
        }
    }

    /// Builds the shared settings handle from the configured thresholds.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::thresholds`].
    pub fn workload_settings(&self) -> Result<WorkloadSettings, ConfigError> {
        Ok(self
            .thresholds()?
            .map_or_else(WorkloadSettings::new, WorkloadSettings::with_thresholds))
    }

    /// Returns the configured database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDatabaseUrl`] when none is configured.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)
    }
}
