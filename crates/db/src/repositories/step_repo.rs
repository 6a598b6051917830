//! Repository for the `recipe_steps` table.

use sqlx::PgPool;

use forkful_core::types::DbId;

use crate::models::recipe::RecipeStep;

/// Provides step-level operations outside the full-aggregate write
/// paths.
pub struct StepRepo;

impl StepRepo {
    /// Append steps to a recipe as one multi-row parameterized insert.
    pub async fn append(
        pool: &PgPool,
        recipe_id: DbId,
        steps: &[RecipeStep],
    ) -> Result<(), sqlx::Error> {
        let step_numbers: Vec<i32> = steps.iter().map(|s| s.step_number).collect();
        let instructions: Vec<String> = steps.iter().map(|s| s.instruction.clone()).collect();

        sqlx::query(
            "INSERT INTO recipe_steps (recipe_id, step_number, instruction)
             SELECT $1, UNNEST($2::INT[]), UNNEST($3::TEXT[])",
        )
        .bind(recipe_id)
        .bind(&step_numbers)
        .bind(&instructions)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Update instructions keyed by `(recipe_id, step_number)`. Entries
    /// with a non-positive step number or empty instruction are
    /// skipped rather than rejected.
    pub async fn update_instructions(
        pool: &PgPool,
        recipe_id: DbId,
        steps: &[RecipeStep],
    ) -> Result<(), sqlx::Error> {
        for step in steps {
            if step.step_number <= 0 || step.instruction.is_empty() {
                continue;
            }
            sqlx::query(
                "UPDATE recipe_steps SET instruction = $1
                 WHERE recipe_id = $2 AND step_number = $3",
            )
            .bind(&step.instruction)
            .bind(recipe_id)
            .bind(step.step_number)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// Delete one step and shift every higher-numbered step down by one
    /// so numbering stays contiguous.
    ///
    /// Returns `false` (renumbering skipped) if no step matched.
    pub async fn delete_and_renumber(
        pool: &PgPool,
        recipe_id: DbId,
        step_number: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM recipe_steps WHERE recipe_id = $1 AND step_number = $2",
        )
        .bind(recipe_id)
        .bind(step_number)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE recipe_steps SET step_number = step_number - 1
             WHERE recipe_id = $1 AND step_number > $2",
        )
        .bind(recipe_id)
        .bind(step_number)
        .execute(pool)
        .await?;

        Ok(true)
    }
}
