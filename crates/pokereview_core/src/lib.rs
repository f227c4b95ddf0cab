//! Core domain logic for the pokemon review service.
//! This crate owns the entity invariants, the store and the use-cases.

pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult, UnitOfWork};
pub use dto::{CategoryDto, CountryDto, OwnerDto, PokemonDto, ReviewDto, ReviewerDto};
pub use logging::{
    default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget,
};
pub use model::{EntityId, ModelValidationError};
pub use repo::category_repo::{CategoryRepository, SqliteCategoryRepository};
pub use repo::country_repo::{CountryRepository, SqliteCountryRepository};
pub use repo::owner_repo::{OwnerRepository, SqliteOwnerRepository};
pub use repo::pokemon_repo::{PokemonRepository, SqlitePokemonRepository};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use repo::reviewer_repo::{ReviewerRepository, SqliteReviewerRepository};
pub use repo::{RepoError, RepoResult};
pub use service::category_service::CategoryService;
pub use service::country_service::CountryService;
pub use service::owner_service::OwnerService;
pub use service::pokemon_service::PokemonService;
pub use service::review_service::ReviewService;
pub use service::reviewer_service::ReviewerService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
