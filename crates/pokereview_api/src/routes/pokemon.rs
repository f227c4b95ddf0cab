use super::{owner, CREATED, DELETED};
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pokereview_core::{
    EntityId, OwnerDto, PokemonDto, PokemonService, SqlitePokemonRepository,
    SqliteReviewRepository,
};
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CreatePokemonParams {
    #[serde(rename = "ownerId")]
    owner_id: EntityId,
    #[serde(rename = "catId")]
    category_id: EntityId,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/pokemon", get(list).post(create))
        .route("/api/pokemon/{id}", get(get_one).put(update).delete(remove))
        .route("/api/pokemon/{id}/rating", get(rating))
        .route("/api/pokemon/{id}/owners", get(owners_of_pokemon))
}

pub(super) fn service(
    conn: &Connection,
) -> PokemonService<SqlitePokemonRepository<'_>, SqliteReviewRepository<'_>> {
    PokemonService::new(
        SqlitePokemonRepository::new(conn),
        SqliteReviewRepository::new(conn),
    )
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<PokemonDto>>, ApiError> {
    let pokemon = state
        .run("pokemon_list", |conn| service(conn).list_pokemon())
        .await?;
    Ok(Json(pokemon))
}

async fn get_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<PokemonDto>, ApiError> {
    let pokemon = state
        .run("pokemon_get", move |conn| service(conn).get_pokemon(id))
        .await?;
    Ok(Json(pokemon))
}

async fn rating(State(state): State<AppState>, IdPath(id): IdPath) -> Result<Json<f64>, ApiError> {
    let rating = state
        .run("pokemon_rating", move |conn| service(conn).pokemon_rating(id))
        .await?;
    Ok(Json(rating))
}

async fn owners_of_pokemon(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<Vec<OwnerDto>>, ApiError> {
    let owners = state
        .run("pokemon_owners", move |conn| {
            service(conn).get_pokemon(id)?;
            owner::service(conn).owners_of_pokemon(id)
        })
        .await?;
    Ok(Json(owners))
}

async fn create(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<CreatePokemonParams>,
    JsonBody(payload): JsonBody<PokemonDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("pokemon_create", move |conn| {
            service(conn).create_pokemon(params.owner_id, params.category_id, payload)
        })
        .await?;
    Ok(CREATED)
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<PokemonDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("pokemon_update", move |conn| {
            service(conn).update_pokemon(id, payload)
        })
        .await?;
    Ok("Pokemon Updated Successfully")
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> Result<&'static str, ApiError> {
    state
        .run("pokemon_delete", move |conn| service(conn).delete_pokemon(id))
        .await?;
    Ok(DELETED)
}
