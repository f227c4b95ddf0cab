use super::{CREATED, DELETED};
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody, QueryParams};
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pokereview_core::{EntityId, OwnerDto, OwnerService, PokemonDto, SqliteOwnerRepository};
use rusqlite::Connection;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CreateOwnerParams {
    #[serde(rename = "countryId")]
    country_id: EntityId,
}

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/owner", get(list).post(create))
        .route("/api/owner/{id}", get(get_one).put(update).delete(remove))
        .route("/api/owner/{id}/pokemon", get(pokemon_of_owner))
}

pub(super) fn service(conn: &Connection) -> OwnerService<SqliteOwnerRepository<'_>> {
    OwnerService::new(SqliteOwnerRepository::new(conn))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<OwnerDto>>, ApiError> {
    let owners = state
        .run("owner_list", |conn| service(conn).list_owners())
        .await?;
    Ok(Json(owners))
}

async fn get_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<OwnerDto>, ApiError> {
    let owner = state
        .run("owner_get", move |conn| service(conn).get_owner(id))
        .await?;
    Ok(Json(owner))
}

async fn pokemon_of_owner(
    State(state): State<AppState>,
    IdPath(owner_id): IdPath,
) -> Result<Json<Vec<PokemonDto>>, ApiError> {
    let pokemon = state
        .run("owner_pokemon", move |conn| {
            service(conn).pokemon_by_owner(owner_id)
        })
        .await?;
    Ok(Json(pokemon))
}

async fn create(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<CreateOwnerParams>,
    JsonBody(payload): JsonBody<OwnerDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("owner_create", move |conn| {
            service(conn).create_owner(params.country_id, payload)
        })
        .await?;
    Ok(CREATED)
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<OwnerDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("owner_update", move |conn| service(conn).update_owner(id, payload))
        .await?;
    Ok("Owner Updated Successfully")
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> Result<&'static str, ApiError> {
    state
        .run("owner_delete", move |conn| service(conn).delete_owner(id))
        .await?;
    Ok(DELETED)
}
