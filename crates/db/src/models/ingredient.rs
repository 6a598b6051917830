//! Ingredient master-data model and DTOs.

use forkful_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ingredients` table. Master data with a lifecycle
/// independent of any recipe.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ingredient {
    pub ingredient_id: DbId,
    pub name: String,
    pub unit: String,
}

/// DTO for a partial ingredient patch. Only non-`None` fields are
/// applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateIngredient {
    pub name: Option<String>,
    pub unit: Option<String>,
}
