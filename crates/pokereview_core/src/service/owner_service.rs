//! Owner use-case service.
//!
//! # Invariants
//! - Owners are unique by last name on create.
//! - Updates replace the owner's own fields and keep its country.

use crate::dto::{map_all, OwnerDto, PokemonDto};
use crate::model::EntityId;
use crate::repo::owner_repo::OwnerRepository;
use crate::service::{
    ensure_unique, write_failure, ServiceError, ServiceResult, DELETE_FAILED, SAVE_FAILED,
    UPDATE_FAILED,
};

pub struct OwnerService<R: OwnerRepository> {
    repo: R,
}

impl<R: OwnerRepository> OwnerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_owners(&self) -> ServiceResult<Vec<OwnerDto>> {
        Ok(map_all(&self.repo.list_owners()?))
    }

    pub fn get_owner(&self, id: EntityId) -> ServiceResult<OwnerDto> {
        self.repo
            .get_owner(id)?
            .map(|owner| OwnerDto::from(&owner))
            .ok_or_else(|| ServiceError::not_found("Owner", id))
    }

    pub fn pokemon_by_owner(&self, owner_id: EntityId) -> ServiceResult<Vec<PokemonDto>> {
        if !self.repo.owner_exists(owner_id)? {
            return Err(ServiceError::not_found("Owner", owner_id));
        }
        Ok(map_all(&self.repo.pokemon_by_owner(owner_id)?))
    }

    pub fn owners_of_pokemon(&self, pokemon_id: EntityId) -> ServiceResult<Vec<OwnerDto>> {
        Ok(map_all(&self.repo.owners_of_pokemon(pokemon_id)?))
    }

    /// Creates an owner living in `country_id`.
    pub fn create_owner(&self, country_id: EntityId, payload: OwnerDto) -> ServiceResult<EntityId> {
        let existing = self.repo.list_owners()?;
        ensure_unique(
            "Owner",
            existing.iter().map(|item| item.last_name.as_str()),
            &payload.last_name,
        )?;

        self.repo
            .create_owner(&payload.into_entity(country_id))
            .map_err(write_failure(SAVE_FAILED))
    }

    pub fn update_owner(&self, route_id: EntityId, payload: OwnerDto) -> ServiceResult<()> {
        if route_id != payload.id {
            return Err(ServiceError::id_mismatch(route_id, payload.id));
        }
        let current = self
            .repo
            .get_owner(route_id)?
            .ok_or_else(|| ServiceError::not_found("Owner", route_id))?;

        self.repo
            .update_owner(&payload.into_entity(current.country_id))
            .map_err(write_failure(UPDATE_FAILED))
    }

    /// Deletes the owner; its pokemon links go with it, the pokemon stay.
    pub fn delete_owner(&self, id: EntityId) -> ServiceResult<()> {
        if !self.repo.owner_exists(id)? {
            return Err(ServiceError::not_found("Owner", id));
        }

        self.repo
            .delete_owner(id)
            .map_err(write_failure(DELETE_FAILED))
    }
}
