use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use freshkeep_ingredient::{Ingredient, ListFilter, RegisterInput, UpdateInput};
use freshkeep_shared::{food::StorageType, ingredient::FreshnessStatus};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    middleware::{ApiJson, ApiQuery, Auth},
};

use super::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListParams {
    pub storage: Option<StorageType>,
    pub status: Option<FreshnessStatus>,
    pub include_inactive: bool,
}

impl From<ListParams> for ListFilter {
    fn from(params: ListParams) -> Self {
        ListFilter {
            storage_type: params.storage,
            freshness_status: params.status,
            include_inactive: params.include_inactive,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkInput {
    pub items: Vec<RegisterInput>,
}

#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub count: usize,
    pub items: Vec<Ingredient>,
}

/// GET /api/ingredients
pub async fn list(
    State(state): State<AppState>,
    auth: Auth,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let ingredients = state
        .ingredient_query
        .list(auth.user_id, params.into())
        .await?;

    Ok(Json(ingredients))
}

/// POST /api/ingredients
pub async fn create(
    State(state): State<AppState>,
    auth: Auth,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<Ingredient>), AppError> {
    let ingredient = state
        .ingredient_command
        .register(&auth.user_id, input, state.today())
        .await?;

    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// POST /api/ingredients/bulk - Photo or receipt batch, all-or-nothing
pub async fn create_bulk(
    State(state): State<AppState>,
    auth: Auth,
    ApiJson(input): ApiJson<BulkInput>,
) -> Result<(StatusCode, Json<BulkResponse>), AppError> {
    let items = state
        .ingredient_command
        .register_bulk(&auth.user_id, input.items, state.today())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkResponse {
            count: items.len(),
            items,
        }),
    ))
}

/// GET /api/ingredients/{id}
pub async fn detail(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<String>,
) -> Result<Json<Ingredient>, AppError> {
    let ingredient = state.ingredient_query.find_owned(&auth.user_id, id).await?;

    Ok(Json(ingredient))
}

/// PATCH /api/ingredients/{id} - Edit, move between storages, consume or waste
pub async fn update(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateInput>,
) -> Result<Json<Ingredient>, AppError> {
    let ingredient = state
        .ingredient_command
        .update(&auth.user_id, &id, input, state.today())
        .await?;

    Ok(Json(ingredient))
}

/// DELETE /api/ingredients/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: Auth,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.ingredient_command.delete(&auth.user_id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
