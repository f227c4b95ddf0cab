use super::{pokemon, CREATED, DELETED};
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pokereview_core::{EntityId, ReviewDto, ReviewService, SqliteReviewRepository};
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CreateReviewParams {
    #[serde(rename = "reviewerId")]
    reviewer_id: EntityId,
    #[serde(rename = "pokeId")]
    pokemon_id: EntityId,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/review", get(list).post(create))
        .route("/api/review/{id}", get(get_one).put(update).delete(remove))
        .route("/api/review/pokemon/{poke_id}/reviews", get(reviews_of_pokemon))
}

fn service(conn: &Connection) -> ReviewService<SqliteReviewRepository<'_>> {
    ReviewService::new(SqliteReviewRepository::new(conn))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let reviews = state
        .run("review_list", |conn| service(conn).list_reviews())
        .await?;
    Ok(Json(reviews))
}

async fn get_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<ReviewDto>, ApiError> {
    let review = state
        .run("review_get", move |conn| service(conn).get_review(id))
        .await?;
    Ok(Json(review))
}

async fn reviews_of_pokemon(
    State(state): State<AppState>,
    IdPath(pokemon_id): IdPath,
) -> Result<Json<Vec<ReviewDto>>, ApiError> {
    let reviews = state
        .run("review_of_pokemon", move |conn| {
            pokemon::service(conn).get_pokemon(pokemon_id)?;
            service(conn).reviews_of_pokemon(pokemon_id)
        })
        .await?;
    Ok(Json(reviews))
}

async fn create(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<CreateReviewParams>,
    JsonBody(payload): JsonBody<ReviewDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("review_create", move |conn| {
            service(conn).create_review(params.reviewer_id, params.pokemon_id, payload)
        })
        .await?;
    Ok(CREATED)
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<ReviewDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("review_update", move |conn| service(conn).update_review(id, payload))
        .await?;
    Ok("Review Updated Successfully")
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> Result<&'static str, ApiError> {
    state
        .run("review_delete", move |conn| service(conn).delete_review(id))
        .await?;
    Ok(DELETED)
}
