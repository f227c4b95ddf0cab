//! HTTP surface for the pokemon review service.
//!
//! # Responsibility
//! - Build the axum `Router` over the core services.
//! - Translate service outcomes into status codes and bodies.
//!
//! # Invariants
//! - Handlers never hold a connection across requests.
//! - Failures always render as `{"errors": [..]}`.

use axum::routing::get;
use axum::{Json, Router};
use pokereview_core::core_version;
use serde::Serialize;
use std::path::PathBuf;

mod error;
mod extract;
mod routes;
mod state;

pub use error::ApiError;
pub use state::AppState;

const DEFAULT_DB_FILE_NAME: &str = "pokereview.sqlite3";

/// Runtime settings the router needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// SQLite file every request opens.
    pub db_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        }
    }
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

/// Builds the full application router.
pub fn router(config: ApiConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::api_routes())
        .with_state(AppState::new(config.db_path))
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: core_version(),
    })
}

#[cfg(test)]
mod tests {
    use super::ApiConfig;

    #[test]
    fn default_config_points_into_temp_dir() {
        let config = ApiConfig::default();
        assert!(config.db_path.starts_with(std::env::temp_dir()));
        assert!(config.db_path.ends_with("pokereview.sqlite3"));
    }
}
