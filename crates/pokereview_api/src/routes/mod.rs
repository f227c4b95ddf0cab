//! Route table, one module per entity.
//!
//! # Responsibility
//! - Bind paths and methods to handlers.
//! - Keep the success bodies of writes as plain text messages.

use crate::state::AppState;
use axum::Router;

mod category;
mod country;
mod owner;
mod pokemon;
mod review;
mod reviewer;

pub(crate) const CREATED: &str = "Successfully Created.";
pub(crate) const DELETED: &str = "Deletion Complete";

pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(category::routes())
        .merge(country::routes())
        .merge(owner::routes())
        .merge(pokemon::routes())
        .merge(review::routes())
        .merge(reviewer::routes())
}
