use super::{CREATED, DELETED};
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pokereview_core::{
    ReviewDto, ReviewerDto, ReviewerService, SqliteReviewRepository, SqliteReviewerRepository,
};
use rusqlite::Connection;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviewer", get(list).post(create))
        .route("/api/reviewer/{id}", get(get_one).put(update).delete(remove))
        .route("/api/reviewer/{id}/reviews", get(reviews_by_reviewer))
}

fn service(
    conn: &Connection,
) -> ReviewerService<SqliteReviewerRepository<'_>, SqliteReviewRepository<'_>> {
    ReviewerService::new(
        SqliteReviewerRepository::new(conn),
        SqliteReviewRepository::new(conn),
    )
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<ReviewerDto>>, ApiError> {
    let reviewers = state
        .run("reviewer_list", |conn| service(conn).list_reviewers())
        .await?;
    Ok(Json(reviewers))
}

async fn get_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ReviewerDto>, ApiError> {
    let reviewer = state
        .run("reviewer_get", move |conn| service(conn).get_reviewer(id))
        .await?;
    Ok(Json(reviewer))
}

async fn reviews_by_reviewer(
    State(state): State<AppState>,
    IdPath(reviewer_id): IdPath,
) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let reviews = state
        .run("reviewer_reviews", move |conn| {
            service(conn).reviews_by_reviewer(reviewer_id)
        })
        .await?;
    Ok(Json(reviews))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ReviewerDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("reviewer_create", move |conn| {
            service(conn).create_reviewer(payload)
        })
        .await?;
    Ok(CREATED)
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<ReviewerDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("reviewer_update", move |conn| {
            service(conn).update_reviewer(id, payload)
        })
        .await?;
    Ok("Reviewer Updated Successfully")
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> Result<&'static str, ApiError> {
    state
        .run("reviewer_delete", move |conn| service(conn).delete_reviewer(id))
        .await?;
    Ok(DELETED)
}
