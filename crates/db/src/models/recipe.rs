//! Recipe entity model, DTOs, and the denormalized aggregate.

use forkful_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `recipes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeRow {
    pub recipe_id: DbId,
    pub recipe_name: String,
    pub user_id: DbId,
    pub image_url: Option<String>,
    pub cooking_time: Option<i32>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The denormalized recipe aggregate served by read endpoints: recipe
/// scalars plus the ingredient and step lists assembled from three
/// tables.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub recipe_id: DbId,
    pub recipe_name: String,
    pub image_url: Option<String>,
    pub cooking_time: Option<i32>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub user_id: DbId,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
}

/// One ingredient entry inside the aggregate, joined with its master
/// data (name and unit).
#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredient {
    pub ingredient_id: DbId,
    pub ingredient_name: String,
    pub unit: String,
    pub quantity: f64,
}

/// One ordered step inside the aggregate. Also the wire shape for step
/// entries in create/update payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeStep {
    pub step_number: i32,
    pub instruction: String,
}

/// One ingredient reference in a create/update payload. Quantity is not
/// range-checked; callers may submit zero or negative amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct IngredientEntry {
    pub ingredient_id: DbId,
    pub quantity: f64,
}

/// DTO for creating a new recipe together with its child rows.
///
/// `image_url` is normally absent here and populated later through the
/// image endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecipe {
    #[validate(length(min = 1, message = "recipe_name must not be empty"))]
    pub recipe_name: String,
    pub user_id: DbId,
    pub image_url: Option<String>,
    pub cooking_time: Option<i32>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
}

/// DTO for replacing a recipe. Scalar fields are written
/// unconditionally (callers resend the full document) and both child
/// lists are fully replaced.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRecipe {
    #[validate(length(min = 1, message = "recipe_name must not be empty"))]
    pub recipe_name: String,
    pub image_url: Option<String>,
    pub cooking_time: Option<i32>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientEntry>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
}
