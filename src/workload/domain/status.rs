//! Workload classification.

use super::WorkloadThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned when no thresholds are configured.
pub const SETTINGS_NOT_CONFIGURED: &str = "Workload settings not configured";

/// Workload classification of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkloadClass {
    /// Predicted workload exceeds the maximum.
    Overloaded,
    /// Predicted workload is below the minimum.
    Underloaded,
    /// Predicted workload lies within the thresholds.
    Balanced,
    /// No thresholds are configured.
    Unknown,
}

impl WorkloadClass {
    /// All classes in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Overloaded,
        Self::Underloaded,
        Self::Balanced,
        Self::Unknown,
    ];

    /// Returns the canonical code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overloaded => "OVERLOADED",
            Self::Underloaded => "UNDERLOADED",
            Self::Balanced => "BALANCED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Overloaded => "Overloaded",
            Self::Underloaded => "Underloaded",
            Self::Balanced => "Balanced",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the display severity.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Overloaded => Severity::Danger,
            Self::Underloaded => Severity::Warning,
            Self::Balanced => Severity::Success,
            Self::Unknown => Severity::Secondary,
        }
    }
}

impl fmt::Display for WorkloadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display severity attached to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Overloaded.
    Danger,
    /// Underloaded.
    Warning,
    /// Balanced.
    Success,
    /// Unknown.
    Secondary,
}

impl Severity {
    /// Returns the canonical code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Secondary => "secondary",
        }
    }
}

/// Classified workload of a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadStatus {
    /// Classification.
    pub status: WorkloadClass,
    /// Display severity.
    pub severity: Severity,
    /// Human-readable summary, e.g. `Balanced (18/20)`.
    pub message: String,
    /// Predicted workload the classification was computed from.
    pub predicted: u32,
}

impl WorkloadStatus {
    /// Classifies a predicted workload against the thresholds.
    ///
    /// Without thresholds the result is [`WorkloadClass::Unknown`].
    #[must_use]
    pub fn classify(predicted: u32, thresholds: Option<WorkloadThresholds>) -> Self {
        let Some(bounds) = thresholds else {
            return Self {
                status: WorkloadClass::Unknown,
                severity: WorkloadClass::Unknown.severity(),
                message: SETTINGS_NOT_CONFIGURED.to_owned(),
                predicted,
            };
        };

        let status = if predicted > bounds.max() {
            WorkloadClass::Overloaded
        } else if predicted < bounds.min() {
            WorkloadClass::Underloaded
        } else {
            WorkloadClass::Balanced
        };
        Self {
            status,
            severity: status.severity(),
            message: format!("{} ({predicted}/{})", status.label(), bounds.max()),
            predicted,
        }
    }
}
