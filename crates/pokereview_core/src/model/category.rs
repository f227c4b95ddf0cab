//! Category entity.

use super::{require_text, EntityId, ModelValidationError};

/// Pokemon category, linked to pokemon through `PokemonCategory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("Category", "name", &self.name)
    }
}
