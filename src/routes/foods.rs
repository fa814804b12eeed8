use axum::Json;
use freshkeep_food::FoodEntry;
use serde::Deserialize;

use crate::{error::AppError, middleware::ApiQuery};

#[derive(Deserialize)]
pub struct LookupParams {
    pub name: String,
}

/// GET /api/foods/lookup?name= - Knowledge base entry for a food name or alias
pub async fn lookup(
    ApiQuery(params): ApiQuery<LookupParams>,
) -> Result<Json<&'static FoodEntry>, AppError> {
    let entry = freshkeep_food::knowledge_base()
        .lookup(&params.name)
        .ok_or(freshkeep_shared::Error::NotFound)?;

    Ok(Json(entry))
}
