//! Handlers for the `/recipes` aggregate endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use forkful_core::types::DbId;
use forkful_db::models::recipe::{CreateRecipe, Recipe, RecipeRow, UpdateRecipe};
use forkful_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};
use crate::response::{MessageResponse, RecipeCreated};
use crate::state::AppState;

/// POST /recipes
///
/// Persists the recipe with its ingredient and step lists in one
/// transaction; a failure in any phase leaves nothing behind.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRecipe>,
) -> AppResult<(StatusCode, Json<RecipeCreated>)> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let recipe_id = RecipeRepo::create(&state.pool, &input)
        .await
        .map_err(|source| AppError::Storage {
            context: "Failed to create recipe",
            source,
        })?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeCreated {
            message: "Recipe created successfully",
            recipe_id,
        }),
    ))
}

/// GET /recipes
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<Recipe>>> {
    let recipes = RecipeRepo::list_all(&state.pool).await?;
    Ok(Json(recipes))
}

/// GET /recipes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Recipe>> {
    let recipe = RecipeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;
    Ok(Json(recipe))
}

/// GET /recipes/user/{user_id}
///
/// An owner with zero recipes is reported as 404, not an empty list --
/// the frontend treats that response as its "no recipes yet" state.
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Recipe>>> {
    let recipes = RecipeRepo::list_by_user(&state.pool, user_id).await?;
    if recipes.is_empty() {
        return Err(AppError::NotFound(
            "No recipes found for this user".to_string(),
        ));
    }
    Ok(Json(recipes))
}

/// PATCH /recipes/{id}
///
/// Full replace: callers resend every scalar field and both child
/// lists.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecipe>,
) -> AppResult<Json<MessageResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = RecipeRepo::update(&state.pool, id, &input).await?;
    if !updated {
        return Err(AppError::NotFound("Recipe not found".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Recipe updated successfully",
    }))
}

/// DELETE /recipes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = RecipeRepo::delete(&state.pool, id)
        .await
        .map_err(|source| AppError::Storage {
            context: "Failed to delete recipe",
            source,
        })?;
    if !deleted {
        return Err(AppError::NotFound("Recipe not found".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Recipe deleted successfully",
    }))
}

/// Payload for the image URL patch.
#[derive(Debug, Deserialize)]
pub struct SetImagePayload {
    pub image_url: Option<String>,
}

/// Response for a successful image patch: acknowledgement plus the
/// updated row.
#[derive(Debug, Serialize)]
pub struct ImageUpdated {
    pub message: &'static str,
    pub data: RecipeRow,
}

/// Response for an image lookup. `image_url` is null for recipes whose
/// image has not been set yet.
#[derive(Debug, Serialize)]
pub struct ImageUrlResponse {
    pub image_url: Option<String>,
}

/// PUT /recipes/{id}/image
///
/// The single-field side channel that populates `image_url` after
/// creation. File storage itself lives outside this service.
pub async fn set_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetImagePayload>,
) -> AppResult<Json<ImageUpdated>> {
    let image_url = input
        .image_url
        .ok_or_else(|| AppError::Validation("image_url is required".to_string()))?;

    let row = RecipeRepo::set_image_url(&state.pool, id, &image_url)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Recipe not found".to_string()))?;

    Ok(Json(ImageUpdated {
        message: "Image updated successfully",
        data: row,
    }))
}

/// GET /recipes/{id}/image
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ImageUrlResponse>> {
    let image_url = RecipeRepo::find_image_url(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Recipe not found".to_string()))?;
    Ok(Json(ImageUrlResponse { image_url }))
}
