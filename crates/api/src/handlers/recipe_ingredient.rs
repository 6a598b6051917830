//! Handlers for the `/recipe-ingredients` association endpoints.
//!
//! Row-level access to individual links; the aggregate endpoints under
//! `/recipes` replace these rows wholesale instead.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use forkful_core::types::DbId;
use forkful_db::models::recipe_ingredient::{RecipeIngredientDetail, RecipeIngredientLink};
use forkful_db::repositories::RecipeIngredientRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Payload for attaching an ingredient to a recipe.
#[derive(Debug, Deserialize)]
pub struct CreateLinkPayload {
    pub recipe_id: Option<DbId>,
    pub ingredient_id: Option<DbId>,
    pub quantity: Option<f64>,
}

/// Payload for updating the quantity on a link.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityPayload {
    pub quantity: Option<f64>,
}

/// POST /recipe-ingredients
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLinkPayload>,
) -> AppResult<(StatusCode, Json<RecipeIngredientLink>)> {
    let (Some(recipe_id), Some(ingredient_id), Some(quantity)) =
        (input.recipe_id, input.ingredient_id, input.quantity)
    else {
        return Err(AppError::Validation(
            "recipe_id, ingredient_id, and quantity are required".to_string(),
        ));
    };

    let link = RecipeIngredientRepo::create(&state.pool, recipe_id, ingredient_id, quantity).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// GET /recipe-ingredients
pub async fn list_all(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RecipeIngredientDetail>>> {
    let links = RecipeIngredientRepo::list_all(&state.pool).await?;
    Ok(Json(links))
}

/// GET /recipe-ingredients/{recipe_id}
pub async fn list_by_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<Json<Vec<RecipeIngredientLink>>> {
    let links = RecipeIngredientRepo::list_by_recipe(&state.pool, recipe_id).await?;
    Ok(Json(links))
}

/// PATCH /recipe-ingredients/{id}
pub async fn update_quantity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuantityPayload>,
) -> AppResult<Json<RecipeIngredientLink>> {
    let quantity = input.quantity.ok_or_else(|| {
        AppError::Validation("Valid recipe_ingredient_id and quantity are required".to_string())
    })?;

    let link = RecipeIngredientRepo::update_quantity(&state.pool, id, quantity)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Recipe ingredient not found".to_string()))?;
    Ok(Json(link))
}

/// DELETE /recipe-ingredients/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = RecipeIngredientRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::ResourceNotFound(
            "Recipe ingredient not found".to_string(),
        ));
    }
    Ok(Json(MessageResponse {
        message: "Deleted successfully",
    }))
}
