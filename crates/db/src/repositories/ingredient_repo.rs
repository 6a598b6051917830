//! Repository for the `ingredients` master-data table.

use sqlx::PgPool;

use forkful_core::types::DbId;

use crate::models::ingredient::{Ingredient, UpdateIngredient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "ingredient_id, name, unit";

/// Provides CRUD operations for ingredient master data.
pub struct IngredientRepo;

impl IngredientRepo {
    /// Insert a new ingredient, returning the created row.
    pub async fn create(pool: &PgPool, name: &str, unit: &str) -> Result<Ingredient, sqlx::Error> {
        let query = format!(
            "INSERT INTO ingredients (name, unit) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(name)
            .bind(unit)
            .fetch_one(pool)
            .await
    }

    /// List all ingredients, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients ORDER BY ingredient_id");
        sqlx::query_as::<_, Ingredient>(&query).fetch_all(pool).await
    }

    /// Update an ingredient. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIngredient,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!(
            "UPDATE ingredients SET
                name = COALESCE($2, name),
                unit = COALESCE($3, unit)
             WHERE ingredient_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.unit)
            .fetch_optional(pool)
            .await
    }

    /// Delete an ingredient by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE ingredient_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
