//! Transfer objects exposed across the HTTP boundary.
//!
//! # Responsibility
//! - Define the flattened wire shape of every entity (camelCase JSON).
//! - Provide explicit entity → transfer object → entity conversions.
//!
//! # Invariants
//! - Foreign keys never travel inside a transfer object; callers supply them
//!   when converting back into an entity.
//! - A missing `id` deserializes as `0`, which inserts ignore.

use crate::model::category::Category;
use crate::model::owner::{Country, Owner};
use crate::model::pokemon::Pokemon;
use crate::model::review::{Review, Reviewer};
use crate::model::EntityId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDto {
    #[serde(default)]
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub gym: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDto {
    #[serde(default)]
    pub id: EntityId,
    pub name: String,
    /// Zone-less `YYYY-MM-DDTHH:MM:SS[.fff]`; offsets and bare dates are rejected.
    pub birth_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[serde(default)]
    pub id: EntityId,
    pub title: String,
    pub text: String,
    pub rating: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerDto {
    #[serde(default)]
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Category> for CategoryDto {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
        }
    }
}

impl CategoryDto {
    pub fn into_entity(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
        }
    }
}

impl From<&Country> for CountryDto {
    fn from(value: &Country) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
        }
    }
}

impl CountryDto {
    pub fn into_entity(self) -> Country {
        Country {
            id: self.id,
            name: self.name,
        }
    }
}

impl From<&Owner> for OwnerDto {
    fn from(value: &Owner) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            gym: value.gym.clone(),
        }
    }
}

impl OwnerDto {
    pub fn into_entity(self, country_id: EntityId) -> Owner {
        Owner {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            gym: self.gym,
            country_id,
        }
    }
}

impl From<&Pokemon> for PokemonDto {
    fn from(value: &Pokemon) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            birth_date: value.birth_date,
        }
    }
}

impl PokemonDto {
    pub fn into_entity(self) -> Pokemon {
        Pokemon {
            id: self.id,
            name: self.name,
            birth_date: self.birth_date,
        }
    }
}

impl From<&Review> for ReviewDto {
    fn from(value: &Review) -> Self {
        Self {
            id: value.id,
            title: value.title.clone(),
            text: value.text.clone(),
            rating: value.rating,
        }
    }
}

impl ReviewDto {
    pub fn into_entity(self, reviewer_id: EntityId, pokemon_id: EntityId) -> Review {
        Review {
            id: self.id,
            title: self.title,
            text: self.text,
            rating: self.rating,
            reviewer_id,
            pokemon_id,
        }
    }
}

impl From<&Reviewer> for ReviewerDto {
    fn from(value: &Reviewer) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
        }
    }
}

impl ReviewerDto {
    pub fn into_entity(self) -> Reviewer {
        Reviewer {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

/// Maps a slice of entities to their transfer objects.
pub fn map_all<'a, E: 'a, D>(items: impl IntoIterator<Item = &'a E>) -> Vec<D>
where
    D: From<&'a E>,
{
    items.into_iter().map(D::from).collect()
}
