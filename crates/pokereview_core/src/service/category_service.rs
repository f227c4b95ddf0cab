//! Category use-case service.

use crate::dto::{map_all, CategoryDto, PokemonDto};
use crate::model::EntityId;
use crate::repo::category_repo::CategoryRepository;
use crate::service::{
    ensure_unique, write_failure, ServiceError, ServiceResult, DELETE_FAILED, SAVE_FAILED,
    UPDATE_FAILED,
};

pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_categories(&self) -> ServiceResult<Vec<CategoryDto>> {
        Ok(map_all(&self.repo.list_categories()?))
    }

    pub fn get_category(&self, id: EntityId) -> ServiceResult<CategoryDto> {
        self.repo
            .get_category(id)?
            .map(|category| CategoryDto::from(&category))
            .ok_or_else(|| ServiceError::not_found("Category", id))
    }

    pub fn pokemon_by_category(&self, category_id: EntityId) -> ServiceResult<Vec<PokemonDto>> {
        if !self.repo.category_exists(category_id)? {
            return Err(ServiceError::not_found("Category", category_id));
        }
        Ok(map_all(&self.repo.pokemon_by_category(category_id)?))
    }

    /// Creates a category unless its name is already taken.
    pub fn create_category(&self, payload: CategoryDto) -> ServiceResult<EntityId> {
        let existing = self.repo.list_categories()?;
        ensure_unique(
            "Category",
            existing.iter().map(|item| item.name.as_str()),
            &payload.name,
        )?;

        self.repo
            .create_category(&payload.into_entity())
            .map_err(write_failure(SAVE_FAILED))
    }

    pub fn update_category(&self, route_id: EntityId, payload: CategoryDto) -> ServiceResult<()> {
        if route_id != payload.id {
            return Err(ServiceError::id_mismatch(route_id, payload.id));
        }
        if !self.repo.category_exists(route_id)? {
            return Err(ServiceError::not_found("Category", route_id));
        }

        self.repo
            .update_category(&payload.into_entity())
            .map_err(write_failure(UPDATE_FAILED))
    }

    /// Deletes the category; its pokemon links go with it.
    pub fn delete_category(&self, id: EntityId) -> ServiceResult<()> {
        if !self.repo.category_exists(id)? {
            return Err(ServiceError::not_found("Category", id));
        }

        self.repo
            .delete_category(id)
            .map_err(write_failure(DELETE_FAILED))
    }
}
