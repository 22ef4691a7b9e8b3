//! Workload thresholds and the weightage range they imply.

use super::WorkloadDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest maximum workload an administrator may configure.
pub const MAX_WORKLOAD_CEILING: u32 = 30;

/// Inclusive range of weightage values a task force may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightageRange {
    min: u32,
    max: u32,
}

impl WeightageRange {
    /// Range applied while no thresholds are configured.
    pub const FALLBACK: Self = Self {
        min: 0,
        max: MAX_WORKLOAD_CEILING,
    };

    /// Returns the lowest accepted weightage.
    #[must_use]
    pub const fn min(self) -> u32 {
        self.min
    }

    /// Returns the highest accepted weightage.
    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Returns `true` when `weightage` lies within the range.
    #[must_use]
    pub const fn contains(self, weightage: u32) -> bool {
        weightage >= self.min && weightage <= self.max
    }
}

impl fmt::Display for WeightageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Minimum and maximum acceptable aggregate weightage per staff member.
///
/// # Example
///
/// ```
/// use tfms::workload::domain::WorkloadThresholds;
///
/// let thresholds = WorkloadThresholds::new(5, 20).expect("valid thresholds");
/// assert!(thresholds.range().contains(12));
/// assert!(WorkloadThresholds::new(10, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WorkloadThresholds {
    min: u32,
    max: u32,
}

impl WorkloadThresholds {
    /// Creates validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadDomainError::InvalidThresholdOrder`] when `min` is
    /// not below `max`, or [`WorkloadDomainError::MaxAboveCeiling`] when
    /// `max` exceeds [`MAX_WORKLOAD_CEILING`].
    pub const fn new(min: u32, max: u32) -> Result<Self, WorkloadDomainError> {
        if min >= max {
            return Err(WorkloadDomainError::InvalidThresholdOrder { min, max });
        }
        if max > MAX_WORKLOAD_CEILING {
            return Err(WorkloadDomainError::MaxAboveCeiling {
                max,
                ceiling: MAX_WORKLOAD_CEILING,
            });
        }
        Ok(Self { min, max })
    }

    /// Returns the minimum acceptable workload.
    #[must_use]
    pub const fn min(self) -> u32 {
        self.min
    }

    /// Returns the maximum acceptable workload.
    #[must_use]
    pub const fn max(self) -> u32 {
        self.max
    }

    /// Returns the weightage range task forces must respect.
    #[must_use]
    pub const fn range(self) -> WeightageRange {
        WeightageRange {
            min: self.min,
            max: self.max,
        }
    }
}

impl<'de> Deserialize<'de> for WorkloadThresholds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Bounds {
            min: u32,
            max: u32,
        }

        let bounds = Bounds::deserialize(deserializer)?;
        Self::new(bounds.min, bounds.max).map_err(serde::de::Error::custom)
    }
}
