//! Handlers for the `/ingredients` master-data endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use forkful_core::types::DbId;
use forkful_db::models::ingredient::{Ingredient, UpdateIngredient};
use forkful_db::repositories::IngredientRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Payload for creating an ingredient. Presence is checked in the
/// handler so a missing or empty field yields the contract's 400 body
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateIngredientPayload {
    pub name: Option<String>,
    pub unit: Option<String>,
}

/// POST /ingredients
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateIngredientPayload>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let (name, unit) = match (input.name.as_deref(), input.unit.as_deref()) {
        (Some(name), Some(unit)) if !name.is_empty() && !unit.is_empty() => (name, unit),
        _ => {
            return Err(AppError::Validation(
                "name and unit are required".to_string(),
            ))
        }
    };

    let ingredient = IngredientRepo::create(&state.pool, name, unit).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// GET /ingredients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Ingredient>>> {
    let ingredients = IngredientRepo::list(&state.pool).await?;
    Ok(Json(ingredients))
}

/// PATCH /ingredients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIngredient>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = IngredientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Ingredient not found".to_string()))?;
    Ok(Json(ingredient))
}

/// DELETE /ingredients/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = IngredientRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::ResourceNotFound(
            "Ingredient not found".to_string(),
        ));
    }
    Ok(Json(MessageResponse {
        message: "Ingredient deleted successfully",
    }))
}
