//! Reviewer use-case service.
//!
//! # Invariants
//! - Reviewers are unique by last name on create.
//! - Delete removes the reviewer's reviews first, then the reviewer, as two
//!   separate commits; both steps always run.

use crate::dto::{map_all, ReviewDto, ReviewerDto};
use crate::model::EntityId;
use crate::repo::review_repo::ReviewRepository;
use crate::repo::reviewer_repo::ReviewerRepository;
use crate::service::{
    cascade_delete, ensure_unique, write_failure, ServiceError, ServiceResult, SAVE_FAILED,
    UPDATE_FAILED,
};

pub struct ReviewerService<V: ReviewerRepository, R: ReviewRepository> {
    reviewers: V,
    reviews: R,
}

impl<V: ReviewerRepository, R: ReviewRepository> ReviewerService<V, R> {
    pub fn new(reviewers: V, reviews: R) -> Self {
        Self { reviewers, reviews }
    }

    pub fn list_reviewers(&self) -> ServiceResult<Vec<ReviewerDto>> {
        Ok(map_all(&self.reviewers.list_reviewers()?))
    }

    pub fn get_reviewer(&self, id: EntityId) -> ServiceResult<ReviewerDto> {
        self.reviewers
            .get_reviewer(id)?
            .map(|reviewer| ReviewerDto::from(&reviewer))
            .ok_or_else(|| ServiceError::not_found("Reviewer", id))
    }

    pub fn reviews_by_reviewer(&self, reviewer_id: EntityId) -> ServiceResult<Vec<ReviewDto>> {
        if !self.reviewers.reviewer_exists(reviewer_id)? {
            return Err(ServiceError::not_found("Reviewer", reviewer_id));
        }
        Ok(map_all(&self.reviewers.reviews_by_reviewer(reviewer_id)?))
    }

    pub fn create_reviewer(&self, payload: ReviewerDto) -> ServiceResult<EntityId> {
        let existing = self.reviewers.list_reviewers()?;
        ensure_unique(
            "Reviewer",
            existing.iter().map(|item| item.last_name.as_str()),
            &payload.last_name,
        )?;

        self.reviewers
            .create_reviewer(&payload.into_entity())
            .map_err(write_failure(SAVE_FAILED))
    }

    pub fn update_reviewer(&self, route_id: EntityId, payload: ReviewerDto) -> ServiceResult<()> {
        if route_id != payload.id {
            return Err(ServiceError::id_mismatch(route_id, payload.id));
        }
        if !self.reviewers.reviewer_exists(route_id)? {
            return Err(ServiceError::not_found("Reviewer", route_id));
        }

        self.reviewers
            .update_reviewer(&payload.into_entity())
            .map_err(write_failure(UPDATE_FAILED))
    }

    pub fn delete_reviewer(&self, id: EntityId) -> ServiceResult<()> {
        if !self.reviewers.reviewer_exists(id)? {
            return Err(ServiceError::not_found("Reviewer", id));
        }

        cascade_delete(
            "Reviewer",
            id,
            || {
                let ids = self
                    .reviewers
                    .reviews_by_reviewer(id)?
                    .iter()
                    .map(|review| review.id)
                    .collect::<Vec<_>>();
                self.reviews.delete_reviews(&ids)
            },
            || self.reviewers.delete_reviewer(id),
        )
    }
}
