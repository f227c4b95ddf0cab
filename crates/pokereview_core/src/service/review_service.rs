//! Review use-case service.
//!
//! # Invariants
//! - Reviews are unique by title on create.
//! - A review's reviewer and pokemon are fixed at creation; updates keep them.

use crate::dto::{map_all, ReviewDto};
use crate::model::EntityId;
use crate::repo::review_repo::ReviewRepository;
use crate::service::{
    ensure_unique, write_failure, ServiceError, ServiceResult, DELETE_FAILED, SAVE_FAILED,
    UPDATE_FAILED,
};

pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_reviews(&self) -> ServiceResult<Vec<ReviewDto>> {
        Ok(map_all(&self.repo.list_reviews()?))
    }

    pub fn get_review(&self, id: EntityId) -> ServiceResult<ReviewDto> {
        self.repo
            .get_review(id)?
            .map(|review| ReviewDto::from(&review))
            .ok_or_else(|| ServiceError::not_found("Review", id))
    }

    pub fn reviews_of_pokemon(&self, pokemon_id: EntityId) -> ServiceResult<Vec<ReviewDto>> {
        Ok(map_all(&self.repo.reviews_of_pokemon(pokemon_id)?))
    }

    /// Creates a review by `reviewer_id` about `pokemon_id`.
    ///
    /// Unknown reviewer or pokemon ids fail with `NotFound`.
    pub fn create_review(
        &self,
        reviewer_id: EntityId,
        pokemon_id: EntityId,
        payload: ReviewDto,
    ) -> ServiceResult<EntityId> {
        let existing = self.repo.list_reviews()?;
        ensure_unique(
            "Review",
            existing.iter().map(|item| item.title.as_str()),
            &payload.title,
        )?;

        self.repo
            .create_review(&payload.into_entity(reviewer_id, pokemon_id))
            .map_err(write_failure(SAVE_FAILED))
    }

    pub fn update_review(&self, route_id: EntityId, payload: ReviewDto) -> ServiceResult<()> {
        if route_id != payload.id {
            return Err(ServiceError::id_mismatch(route_id, payload.id));
        }
        let current = self
            .repo
            .get_review(route_id)?
            .ok_or_else(|| ServiceError::not_found("Review", route_id))?;

        self.repo
            .update_review(&payload.into_entity(current.reviewer_id, current.pokemon_id))
            .map_err(write_failure(UPDATE_FAILED))
    }

    pub fn delete_review(&self, id: EntityId) -> ServiceResult<()> {
        if !self.repo.review_exists(id)? {
            return Err(ServiceError::not_found("Review", id));
        }

        self.repo
            .delete_review(id)
            .map_err(write_failure(DELETE_FAILED))
    }
}
