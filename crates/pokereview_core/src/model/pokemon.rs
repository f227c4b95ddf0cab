//! Pokemon entity and its join entities.
//!
//! # Invariants
//! - A join row only exists while both of its sides exist.
//! - Reviews reference pokemon but are never removed by the store; see
//!   `PokemonService::delete_pokemon` for the explicit cascade.

use super::{require_text, EntityId, ModelValidationError};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    pub id: EntityId,
    pub name: String,
    pub birth_date: NaiveDateTime,
}

impl Pokemon {
    pub fn new(name: impl Into<String>, birth_date: NaiveDateTime) -> Self {
        Self {
            id: 0,
            name: name.into(),
            birth_date,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("Pokemon", "name", &self.name)
    }
}

/// Association row between a pokemon and one of its owners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PokemonOwner {
    pub pokemon_id: EntityId,
    pub owner_id: EntityId,
}

/// Association row between a pokemon and one of its categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PokemonCategory {
    pub pokemon_id: EntityId,
    pub category_id: EntityId,
}
