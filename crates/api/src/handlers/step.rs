//! Handlers for the step sub-resource under `/recipes/{id}/steps`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use forkful_core::types::DbId;
use forkful_db::models::recipe::RecipeStep;
use forkful_db::repositories::StepRepo;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Wrapper payload for the step batch endpoints.
#[derive(Debug, Deserialize)]
pub struct StepsPayload {
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
}

/// POST /recipes/{id}/steps
pub async fn append_steps(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StepsPayload>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    if input.steps.is_empty() {
        return Err(AppError::Validation(
            "Steps must be a non-empty array".to_string(),
        ));
    }

    StepRepo::append(&state.pool, id, &input.steps).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Steps added successfully",
        }),
    ))
}

/// PATCH /recipes/{id}/steps
///
/// Rewrites instructions keyed by step number; entries without a usable
/// key or text are silently skipped.
pub async fn update_steps(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<StepsPayload>,
) -> AppResult<Json<MessageResponse>> {
    if input.steps.is_empty() {
        return Err(AppError::Validation(
            "Steps must be a non-empty array".to_string(),
        ));
    }

    StepRepo::update_instructions(&state.pool, id, &input.steps).await?;

    Ok(Json(MessageResponse {
        message: "Steps updated successfully",
    }))
}

/// DELETE /recipes/{id}/steps/{step_number}
///
/// Removes one step and renumbers the remainder so numbering stays
/// contiguous.
pub async fn delete_step(
    State(state): State<AppState>,
    Path((id, step_number)): Path<(DbId, i32)>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = StepRepo::delete_and_renumber(&state.pool, id, step_number).await?;
    if !deleted {
        return Err(AppError::ResourceNotFound("Step not found".to_string()));
    }
    Ok(Json(MessageResponse {
        message: "Step deleted successfully",
    }))
}
