//! Shared router state and the per-request connection scope.
//!
//! # Invariants
//! - Each call opens its own connection and drops it before returning.
//! - Store work never runs on an async worker thread.

use crate::error::ApiError;
use log::{info, warn};
use pokereview_core::{open_db, ServiceResult};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path: Arc::new(db_path),
        }
    }

    /// Runs `f` against a fresh connection on the blocking pool and logs one
    /// event for the outcome, labelled `op`.
    pub(crate) async fn run<T, F>(&self, op: &'static str, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    {
        let started_at = Instant::now();
        let db_path = Arc::clone(&self.db_path);
        let result = tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let conn = open_db(db_path.as_path())?;
            Ok(f(&conn)?)
        })
        .await
        .map_err(ApiError::from)
        .and_then(|outcome| outcome);

        let duration_ms = started_at.elapsed().as_millis();
        match &result {
            Ok(_) => info!(
                "event=api_call module=api op={} status=ok duration_ms={}",
                op, duration_ms
            ),
            Err(err) => warn!(
                "event=api_call module=api op={} status=error http_status={} duration_ms={} error={}",
                op,
                err.status().as_u16(),
                duration_ms,
                err
            ),
        }
        result
    }
}
