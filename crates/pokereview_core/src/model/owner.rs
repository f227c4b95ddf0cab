//! Owner and Country entities.
//!
//! # Invariants
//! - Every owner belongs to exactly one existing country (`country_id`).

use super::{require_text, EntityId, ModelValidationError};

/// Country an owner lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: EntityId,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("Country", "name", &self.name)
    }
}

/// Pokemon owner (trainer). Unique by `last_name` on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub gym: String,
    /// Foreign key to `countries.id`.
    pub country_id: EntityId,
}

impl Owner {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("Owner", "firstName", &self.first_name)?;
        require_text("Owner", "lastName", &self.last_name)?;
        require_text("Owner", "gym", &self.gym)
    }
}
