use super::{CREATED, DELETED};
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pokereview_core::{CountryDto, CountryService, OwnerDto, SqliteCountryRepository};
use rusqlite::Connection;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/country", get(list).post(create))
        .route("/api/country/{id}", get(get_one).put(update).delete(remove))
        .route("/api/country/{id}/owners", get(owners_in_country))
        .route("/api/country/owners/{owner_id}", get(country_of_owner))
}

fn service(conn: &Connection) -> CountryService<SqliteCountryRepository<'_>> {
    CountryService::new(SqliteCountryRepository::new(conn))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<CountryDto>>, ApiError> {
    let countries = state
        .run("country_list", |conn| service(conn).list_countries())
        .await?;
    Ok(Json(countries))
}

async fn get_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CountryDto>, ApiError> {
    let country = state
        .run("country_get", move |conn| service(conn).get_country(id))
        .await?;
    Ok(Json(country))
}

async fn country_of_owner(
    State(state): State<AppState>,
    IdPath(owner_id): IdPath,
) -> Result<Json<CountryDto>, ApiError> {
    let country = state
        .run("country_of_owner", move |conn| {
            service(conn).country_of_owner(owner_id)
        })
        .await?;
    Ok(Json(country))
}

async fn owners_in_country(
    State(state): State<AppState>,
    IdPath(country_id): IdPath,
) -> Result<Json<Vec<OwnerDto>>, ApiError> {
    let owners = state
        .run("country_owners", move |conn| {
            service(conn).owners_by_country(country_id)
        })
        .await?;
    Ok(Json(owners))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CountryDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("country_create", move |conn| service(conn).create_country(payload))
        .await?;
    Ok(CREATED)
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<CountryDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("country_update", move |conn| {
            service(conn).update_country(id, payload)
        })
        .await?;
    Ok("Country Updated Successfully")
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> Result<&'static str, ApiError> {
    state
        .run("country_delete", move |conn| service(conn).delete_country(id))
        .await?;
    Ok(DELETED)
}
