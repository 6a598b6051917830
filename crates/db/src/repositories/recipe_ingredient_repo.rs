//! Repository for the `recipe_ingredients` association table.
//!
//! Row-level access used by the association endpoints; the aggregate
//! write paths in `recipe_repo` replace these rows wholesale instead.

use sqlx::PgPool;

use forkful_core::types::DbId;

use crate::models::recipe_ingredient::{RecipeIngredientDetail, RecipeIngredientLink};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "recipe_ingredient_id, recipe_id, ingredient_id, quantity";

/// Provides CRUD operations for individual recipe-ingredient links.
pub struct RecipeIngredientRepo;

impl RecipeIngredientRepo {
    /// Attach an ingredient to a recipe, returning the created row.
    pub async fn create(
        pool: &PgPool,
        recipe_id: DbId,
        ingredient_id: DbId,
        quantity: f64,
    ) -> Result<RecipeIngredientLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeIngredientLink>(&query)
            .bind(recipe_id)
            .bind(ingredient_id)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// List every link joined with its ingredient's master data.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RecipeIngredientDetail>, sqlx::Error> {
        sqlx::query_as::<_, RecipeIngredientDetail>(
            "SELECT ri.recipe_ingredient_id, ri.recipe_id, ri.ingredient_id, ri.quantity,
                    i.name AS ingredient_name, i.unit
             FROM recipe_ingredients ri
             JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
             ORDER BY ri.recipe_ingredient_id",
        )
        .fetch_all(pool)
        .await
    }

    /// List the links for one recipe, ordered by id.
    pub async fn list_by_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<RecipeIngredientLink>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_ingredients
             WHERE recipe_id = $1
             ORDER BY recipe_ingredient_id"
        );
        sqlx::query_as::<_, RecipeIngredientLink>(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await
    }

    /// Update the quantity on a link. Returns `None` if no row with the
    /// given id exists.
    pub async fn update_quantity(
        pool: &PgPool,
        id: DbId,
        quantity: f64,
    ) -> Result<Option<RecipeIngredientLink>, sqlx::Error> {
        let query = format!(
            "UPDATE recipe_ingredients SET quantity = $2
             WHERE recipe_ingredient_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeIngredientLink>(&query)
            .bind(id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a link by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_ingredient_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
