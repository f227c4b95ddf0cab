//! Review and Reviewer entities.

use super::{require_text, EntityId, ModelValidationError};

/// A reviewer's rating of one pokemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: EntityId,
    pub title: String,
    pub text: String,
    pub rating: i32,
    /// Foreign key to `reviewers.id`.
    pub reviewer_id: EntityId,
    /// Foreign key to `pokemon.id`.
    pub pokemon_id: EntityId,
}

impl Review {
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("Review", "title", &self.title)?;
        require_text("Review", "text", &self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewer {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

impl Reviewer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("Reviewer", "firstName", &self.first_name)?;
        require_text("Reviewer", "lastName", &self.last_name)
    }
}
