//! Department record.

use super::{DepartmentId, DepartmentName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A university department. Referenced by staff and task forces but owns
/// neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: DepartmentName,
    created_at: DateTime<Utc>,
}

impl Department {
    /// Creates a new department.
    #[must_use]
    pub fn new(name: DepartmentName, clock: &impl Clock) -> Self {
        Self {
            id: DepartmentId::new(),
            name,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a department from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: DepartmentId,
        name: DepartmentName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }

    /// Returns the department identifier.
    #[must_use]
    pub const fn id(&self) -> DepartmentId {
        self.id
    }

    /// Returns the department name.
    #[must_use]
    pub const fn name(&self) -> &DepartmentName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
