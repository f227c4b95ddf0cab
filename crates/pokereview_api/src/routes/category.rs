use super::{CREATED, DELETED};
use crate::error::ApiError;
use crate::extract::{IdPath, JsonBody};
use crate::state::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use pokereview_core::{CategoryDto, CategoryService, PokemonDto, SqliteCategoryRepository};
use rusqlite::Connection;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/category", get(list).post(create))
        .route(
            "/api/category/{id}",
            get(get_one).put(update).delete(remove),
        )
        .route("/api/category/pokemon/{category_id}", get(pokemon_in_category))
}

fn service(conn: &Connection) -> CategoryService<SqliteCategoryRepository<'_>> {
    CategoryService::new(SqliteCategoryRepository::new(conn))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = state
        .run("category_list", |conn| service(conn).list_categories())
        .await?;
    Ok(Json(categories))
}

async fn get_one(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<CategoryDto>, ApiError> {
    let category = state
        .run("category_get", move |conn| service(conn).get_category(id))
        .await?;
    Ok(Json(category))
}

async fn pokemon_in_category(
    State(state): State<AppState>,
    IdPath(category_id): IdPath,
) -> Result<Json<Vec<PokemonDto>>, ApiError> {
    let pokemon = state
        .run("category_pokemon", move |conn| {
            service(conn).pokemon_by_category(category_id)
        })
        .await?;
    Ok(Json(pokemon))
}

async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CategoryDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("category_create", move |conn| {
            service(conn).create_category(payload)
        })
        .await?;
    Ok(CREATED)
}

async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<CategoryDto>,
) -> Result<&'static str, ApiError> {
    state
        .run("category_update", move |conn| {
            service(conn).update_category(id, payload)
        })
        .await?;
    Ok("Category Updated Successfully")
}

async fn remove(State(state): State<AppState>, IdPath(id): IdPath) -> Result<&'static str, ApiError> {
    state
        .run("category_delete", move |conn| service(conn).delete_category(id))
        .await?;
    Ok(DELETED)
}
