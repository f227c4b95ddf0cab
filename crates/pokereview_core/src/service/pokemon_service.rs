//! Pokemon use-case service.
//!
//! # Responsibility
//! - Pokemon CRUD, rating, and the owner/category links made on create.
//! - The review cascade on delete.
//!
//! # Invariants
//! - Delete removes the pokemon's reviews first, then the pokemon, as two
//!   separate commits; both steps always run.

use crate::dto::{map_all, PokemonDto};
use crate::model::EntityId;
use crate::repo::pokemon_repo::PokemonRepository;
use crate::repo::review_repo::ReviewRepository;
use crate::service::{
    cascade_delete, ensure_unique, write_failure, ServiceError, ServiceResult, SAVE_FAILED,
    UPDATE_FAILED,
};

pub struct PokemonService<P: PokemonRepository, R: ReviewRepository> {
    pokemon: P,
    reviews: R,
}

impl<P: PokemonRepository, R: ReviewRepository> PokemonService<P, R> {
    pub fn new(pokemon: P, reviews: R) -> Self {
        Self { pokemon, reviews }
    }

    pub fn list_pokemon(&self) -> ServiceResult<Vec<PokemonDto>> {
        Ok(map_all(&self.pokemon.list_pokemon()?))
    }

    pub fn get_pokemon(&self, id: EntityId) -> ServiceResult<PokemonDto> {
        self.pokemon
            .get_pokemon(id)?
            .map(|pokemon| PokemonDto::from(&pokemon))
            .ok_or_else(|| ServiceError::not_found("Pokemon", id))
    }

    /// Mean rating of the pokemon's reviews (`0` without reviews).
    pub fn pokemon_rating(&self, id: EntityId) -> ServiceResult<f64> {
        if !self.pokemon.pokemon_exists(id)? {
            return Err(ServiceError::not_found("Pokemon", id));
        }
        Ok(self.pokemon.pokemon_rating(id)?)
    }

    /// Creates a pokemon owned by `owner_id` in category `category_id`.
    ///
    /// Unknown owner or category ids fail with `NotFound`.
    pub fn create_pokemon(
        &self,
        owner_id: EntityId,
        category_id: EntityId,
        payload: PokemonDto,
    ) -> ServiceResult<EntityId> {
        let existing = self.pokemon.list_pokemon()?;
        ensure_unique(
            "Pokemon",
            existing.iter().map(|item| item.name.as_str()),
            &payload.name,
        )?;

        self.pokemon
            .create_pokemon(owner_id, category_id, &payload.into_entity())
            .map_err(write_failure(SAVE_FAILED))
    }

    /// Full-record replace of name and birth date; links are unchanged.
    pub fn update_pokemon(&self, route_id: EntityId, payload: PokemonDto) -> ServiceResult<()> {
        if route_id != payload.id {
            return Err(ServiceError::id_mismatch(route_id, payload.id));
        }
        if !self.pokemon.pokemon_exists(route_id)? {
            return Err(ServiceError::not_found("Pokemon", route_id));
        }

        self.pokemon
            .update_pokemon(&payload.into_entity())
            .map_err(write_failure(UPDATE_FAILED))
    }

    pub fn delete_pokemon(&self, id: EntityId) -> ServiceResult<()> {
        if !self.pokemon.pokemon_exists(id)? {
            return Err(ServiceError::not_found("Pokemon", id));
        }

        cascade_delete(
            "Pokemon",
            id,
            || {
                let ids = self
                    .reviews
                    .reviews_of_pokemon(id)?
                    .iter()
                    .map(|review| review.id)
                    .collect::<Vec<_>>();
                self.reviews.delete_reviews(&ids)
            },
            || self.pokemon.delete_pokemon(id),
        )
    }
}
