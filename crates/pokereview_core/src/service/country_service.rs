//! Country use-case service.

use crate::dto::{map_all, CountryDto, OwnerDto};
use crate::model::EntityId;
use crate::repo::country_repo::CountryRepository;
use crate::service::{
    ensure_unique, write_failure, ServiceError, ServiceResult, DELETE_FAILED, SAVE_FAILED,
    UPDATE_FAILED,
};

pub struct CountryService<R: CountryRepository> {
    repo: R,
}

impl<R: CountryRepository> CountryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_countries(&self) -> ServiceResult<Vec<CountryDto>> {
        Ok(map_all(&self.repo.list_countries()?))
    }

    pub fn get_country(&self, id: EntityId) -> ServiceResult<CountryDto> {
        self.repo
            .get_country(id)?
            .map(|country| CountryDto::from(&country))
            .ok_or_else(|| ServiceError::not_found("Country", id))
    }

    /// Country of an owner; `NotFound` names the owner when it is missing.
    pub fn country_of_owner(&self, owner_id: EntityId) -> ServiceResult<CountryDto> {
        self.repo
            .country_of_owner(owner_id)?
            .map(|country| CountryDto::from(&country))
            .ok_or_else(|| ServiceError::not_found("Owner", owner_id))
    }

    pub fn owners_by_country(&self, country_id: EntityId) -> ServiceResult<Vec<OwnerDto>> {
        if !self.repo.country_exists(country_id)? {
            return Err(ServiceError::not_found("Country", country_id));
        }
        Ok(map_all(&self.repo.owners_by_country(country_id)?))
    }

    pub fn create_country(&self, payload: CountryDto) -> ServiceResult<EntityId> {
        let existing = self.repo.list_countries()?;
        ensure_unique(
            "Country",
            existing.iter().map(|item| item.name.as_str()),
            &payload.name,
        )?;

        self.repo
            .create_country(&payload.into_entity())
            .map_err(write_failure(SAVE_FAILED))
    }

    pub fn update_country(&self, route_id: EntityId, payload: CountryDto) -> ServiceResult<()> {
        if route_id != payload.id {
            return Err(ServiceError::id_mismatch(route_id, payload.id));
        }
        if !self.repo.country_exists(route_id)? {
            return Err(ServiceError::not_found("Country", route_id));
        }

        self.repo
            .update_country(&payload.into_entity())
            .map_err(write_failure(UPDATE_FAILED))
    }

    /// Deletes the country. Fails with `Persistence` while owners still
    /// reference it.
    pub fn delete_country(&self, id: EntityId) -> ServiceResult<()> {
        if !self.repo.country_exists(id)? {
            return Err(ServiceError::not_found("Country", id));
        }

        self.repo
            .delete_country(id)
            .map_err(write_failure(DELETE_FAILED))
    }
}
