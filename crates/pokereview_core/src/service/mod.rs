//! Use-case services, one per entity.
//!
//! # Responsibility
//! - Run the write state machine: payload validation, route/body id match,
//!   existence check, duplicate-name check, repository call.
//! - Map entities to transfer objects for callers.
//! - Collapse repository outcomes into the four caller-facing error kinds.
//!
//! # Invariants
//! - Duplicate-name checks run on create only and are check-then-act.
//! - Cascading deletes always attempt both steps; failures are collected.

use crate::model::{name_key, EntityId};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category_service;
pub mod country_service;
pub mod owner_service;
pub mod pokemon_service;
pub mod review_service;
pub mod reviewer_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

pub(crate) const SAVE_FAILED: &str = "Something went wrong while saving.";
pub(crate) const UPDATE_FAILED: &str = "Something Went Wrong";
pub(crate) const DELETE_FAILED: &str = "Something Went Wrong";
pub(crate) const DELETE_REVIEWS_FAILED: &str = "Something went wrong when deleting reviews.";

/// Caller-facing outcome of a failed use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed input or route/body id mismatch.
    Validation(Vec<String>),
    /// The addressed or referenced entity does not exist.
    NotFound(String),
    /// The designated name is already taken.
    Conflict(String),
    /// The store did not persist the change.
    Persistence(Vec<String>),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &str, id: EntityId) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    pub(crate) fn already_exists(entity: &str) -> Self {
        Self::Conflict(format!("{entity} Already Exists"))
    }

    pub(crate) fn id_mismatch(route_id: EntityId, body_id: EntityId) -> Self {
        Self::Validation(vec![format!(
            "Route id {route_id} does not match body id {body_id}."
        )])
    }

    /// Flat list of human-readable messages for the response body.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) | Self::Persistence(messages) => messages.clone(),
            Self::NotFound(message) | Self::Conflict(message) => vec![message.clone()],
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(messages) => write!(f, "validation failed: {}", messages.join("; ")),
            Self::NotFound(message) => write!(f, "not found: {message}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::Persistence(messages) => {
                write!(f, "persistence failed: {}", messages.join("; "))
            }
        }
    }
}

impl Error for ServiceError {}

/// Read paths: any store failure is a persistence failure.
impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(vec![err.to_string()]),
            RepoError::NotFound { entity, id } => Self::not_found(entity, id),
            other => {
                warn!(
                    "event=repo_failure module=service status=error error={}",
                    other
                );
                Self::Persistence(vec![other.to_string()])
            }
        }
    }
}

/// Write paths: keeps validation/not-found outcomes and replaces store
/// failures with the operation's user-facing `message`.
pub(crate) fn write_failure(message: &'static str) -> impl FnOnce(RepoError) -> ServiceError {
    move |err| match err {
        RepoError::Validation(_) | RepoError::NotFound { .. } => ServiceError::from(err),
        other => {
            warn!(
                "event=save_failed module=service status=error message={:?} error={}",
                message, other
            );
            ServiceError::Persistence(vec![message.to_string()])
        }
    }
}

/// Rejects `candidate` when an existing name matches it, ignoring case and
/// surrounding whitespace.
pub(crate) fn ensure_unique<'a>(
    entity: &str,
    existing_names: impl IntoIterator<Item = &'a str>,
    candidate: &str,
) -> ServiceResult<()> {
    let key = name_key(candidate);
    if existing_names.into_iter().any(|name| name_key(name) == key) {
        return Err(ServiceError::already_exists(entity));
    }
    Ok(())
}

/// Deletes dependent rows, then the parent, as two separate commits.
///
/// A failed first step is recorded and the parent delete still runs.
pub(crate) fn cascade_delete(
    entity: &str,
    id: EntityId,
    delete_children: impl FnOnce() -> RepoResult<usize>,
    delete_parent: impl FnOnce() -> RepoResult<()>,
) -> ServiceResult<()> {
    let mut failures = Vec::new();

    match delete_children() {
        Ok(removed) => info!(
            "event=cascade_delete module=service step=children status=ok entity={} id={} removed={}",
            entity,
            id,
            removed
        ),
        Err(err) => {
            warn!(
                "event=cascade_delete module=service step=children status=error entity={} id={} error={}",
                entity, id, err
            );
            failures.push(DELETE_REVIEWS_FAILED.to_string());
        }
    }

    if let Err(err) = delete_parent() {
        warn!(
            "event=cascade_delete module=service step=parent status=error entity={} id={} error={}",
            entity, id, err
        );
        failures.push(DELETE_FAILED.to_string());
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Persistence(failures))
    }
}
