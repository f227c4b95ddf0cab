//! Relational domain model for the review service.
//!
//! # Responsibility
//! - Define persistence entities and the two join entities.
//! - Provide field validation and the duplicate-name key.
//!
//! # Invariants
//! - Ids are generated by the store; the `id` of an entity that has not been
//!   inserted yet is ignored on insert.
//! - Join entities have no lifecycle of their own; the store removes them
//!   with either side of the association.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod category;
pub mod owner;
pub mod pokemon;
pub mod review;

/// Store-generated integer identifier shared by every entity table.
pub type EntityId = i64;

/// Field-level validation failure on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required text field is empty or whitespace only.
    BlankField {
        entity: &'static str,
        field: &'static str,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { entity, field } => {
                write!(f, "The {field} field of {entity} is required.")
            }
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField { entity, field });
    }
    Ok(())
}

/// Normalized key used for the application-level duplicate-name check.
///
/// Surrounding whitespace is ignored and comparison is case-insensitive.
pub fn name_key(value: &str) -> String {
    value.trim().to_uppercase()
}
