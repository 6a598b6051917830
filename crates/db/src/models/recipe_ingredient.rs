//! Recipe-ingredient association model.

use forkful_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `recipe_ingredients` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeIngredientLink {
    pub recipe_ingredient_id: DbId,
    pub recipe_id: DbId,
    pub ingredient_id: DbId,
    pub quantity: f64,
}

/// A join row enriched with the ingredient's master data.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeIngredientDetail {
    pub recipe_ingredient_id: DbId,
    pub recipe_id: DbId,
    pub ingredient_id: DbId,
    pub quantity: f64,
    pub ingredient_name: String,
    pub unit: String,
}
