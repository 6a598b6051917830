//! Repository for the `recipes` table and the recipe aggregate.
//!
//! Reads assemble the denormalized aggregate (recipe scalars +
//! ingredients + steps) from a left join and a separate ordered steps
//! query. Writes that touch more than one table run inside a single
//! transaction so a failure in any phase leaves no partial recipe
//! behind.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};

use forkful_core::types::DbId;

use crate::models::recipe::{
    CreateRecipe, IngredientEntry, Recipe, RecipeIngredient, RecipeRow, RecipeStep, UpdateRecipe,
};

/// Join column list shared by every aggregate read. Ingredient columns
/// come from the left join and are NULL for recipes without
/// ingredients.
const AGGREGATE_COLUMNS: &str = "r.recipe_id, r.recipe_name, r.image_url, \
    r.cooking_time, r.description, r.difficulty, r.user_id, \
    i.ingredient_id, i.name AS ingredient_name, i.unit, ri.quantity";

/// Column list for plain `recipes` rows.
const COLUMNS: &str = "recipe_id, recipe_name, user_id, image_url, \
    cooking_time, description, difficulty, created_at, updated_at";

/// One flat row out of the recipes / recipe_ingredients / ingredients
/// left join.
#[derive(Debug, sqlx::FromRow)]
struct AggregateRow {
    recipe_id: DbId,
    recipe_name: String,
    image_url: Option<String>,
    cooking_time: Option<i32>,
    description: Option<String>,
    difficulty: Option<String>,
    user_id: DbId,
    ingredient_id: Option<DbId>,
    ingredient_name: Option<String>,
    unit: Option<String>,
    quantity: Option<f64>,
}

/// One row from `recipe_steps`, tagged with its recipe for grouping.
#[derive(Debug, sqlx::FromRow)]
struct StepRow {
    recipe_id: DbId,
    step_number: i32,
    instruction: String,
}

/// Provides aggregate reads and transactional writes for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe with its ingredient and step rows as one
    /// all-or-nothing unit, returning the generated id.
    ///
    /// Empty child lists skip the corresponding insert. Any error in
    /// any phase rolls back all three, including the recipe row.
    pub async fn create(pool: &PgPool, input: &CreateRecipe) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO recipes
                (recipe_name, user_id, image_url, cooking_time, description, difficulty)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING recipe_id",
        )
        .bind(&input.recipe_name)
        .bind(input.user_id)
        .bind(&input.image_url)
        .bind(input.cooking_time)
        .bind(&input.description)
        .bind(&input.difficulty)
        .fetch_one(&mut *tx)
        .await?;
        let recipe_id = row.0;

        if !input.ingredients.is_empty() {
            insert_ingredient_rows(&mut tx, recipe_id, &input.ingredients).await?;
        }
        if !input.steps.is_empty() {
            insert_step_rows(&mut tx, recipe_id, &input.steps).await?;
        }

        tx.commit().await?;
        Ok(recipe_id)
    }

    /// Assemble the aggregate for one recipe. Returns `None` if no
    /// recipe row matched.
    pub async fn find_by_id(pool: &PgPool, recipe_id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {AGGREGATE_COLUMNS}
             FROM recipes r
             LEFT JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
             LEFT JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
             WHERE r.recipe_id = $1
             ORDER BY r.recipe_id"
        );
        let rows: Vec<AggregateRow> = sqlx::query_as(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await?;

        let steps: Vec<StepRow> = sqlx::query_as(
            "SELECT recipe_id, step_number, instruction
             FROM recipe_steps
             WHERE recipe_id = $1
             ORDER BY step_number",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await?;

        Ok(group_aggregates(rows, steps).into_iter().next())
    }

    /// Assemble aggregates for every recipe, ordered by recipe id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {AGGREGATE_COLUMNS}
             FROM recipes r
             LEFT JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
             LEFT JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
             ORDER BY r.recipe_id"
        );
        let rows: Vec<AggregateRow> = sqlx::query_as(&query).fetch_all(pool).await?;

        let steps: Vec<StepRow> = sqlx::query_as(
            "SELECT recipe_id, step_number, instruction
             FROM recipe_steps
             ORDER BY recipe_id, step_number",
        )
        .fetch_all(pool)
        .await?;

        Ok(group_aggregates(rows, steps))
    }

    /// Assemble aggregates for one owner, ordered by recipe id. An
    /// owner with no recipes yields an empty Vec; the HTTP layer maps
    /// that to its legacy not-found response.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {AGGREGATE_COLUMNS}
             FROM recipes r
             LEFT JOIN recipe_ingredients ri ON r.recipe_id = ri.recipe_id
             LEFT JOIN ingredients i ON ri.ingredient_id = i.ingredient_id
             WHERE r.user_id = $1
             ORDER BY r.recipe_id"
        );
        let rows: Vec<AggregateRow> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let steps: Vec<StepRow> = sqlx::query_as(
            "SELECT recipe_id, step_number, instruction
             FROM recipe_steps
             WHERE recipe_id IN (SELECT recipe_id FROM recipes WHERE user_id = $1)
             ORDER BY recipe_id, step_number",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(group_aggregates(rows, steps))
    }

    /// Replace a recipe: unconditional scalar update, then full
    /// replacement of both child sets, all in one transaction.
    ///
    /// Returns `false` (without touching the children) if no recipe row
    /// matched.
    pub async fn update(
        pool: &PgPool,
        recipe_id: DbId,
        input: &UpdateRecipe,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE recipes SET
                recipe_name = $2,
                image_url = $3,
                cooking_time = $4,
                description = $5,
                difficulty = $6,
                updated_at = NOW()
             WHERE recipe_id = $1",
        )
        .bind(recipe_id)
        .bind(&input.recipe_name)
        .bind(&input.image_url)
        .bind(input.cooking_time)
        .bind(&input.description)
        .bind(&input.difficulty)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        if !input.ingredients.is_empty() {
            insert_ingredient_rows(&mut tx, recipe_id, &input.ingredients).await?;
        }

        sqlx::query("DELETE FROM recipe_steps WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;
        if !input.steps.is_empty() {
            insert_step_rows(&mut tx, recipe_id, &input.steps).await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Delete a recipe and its child rows in reverse dependency order
    /// (steps, ingredients, recipe) as one transaction. Returns `true`
    /// iff the recipe row existed.
    pub async fn delete(pool: &PgPool, recipe_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM recipe_steps WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM recipes WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Single-field patch for the image side channel. Returns the
    /// updated row, or `None` if the recipe does not exist.
    pub async fn set_image_url(
        pool: &PgPool,
        recipe_id: DbId,
        image_url: &str,
    ) -> Result<Option<RecipeRow>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET image_url = $2, updated_at = NOW()
             WHERE recipe_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeRow>(&query)
            .bind(recipe_id)
            .bind(image_url)
            .fetch_optional(pool)
            .await
    }

    /// Fetch just the image URL. The outer `Option` distinguishes a
    /// missing recipe from a recipe without an image.
    pub async fn find_image_url(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Option<Option<String>>, sqlx::Error> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT image_url FROM recipes WHERE recipe_id = $1")
                .bind(recipe_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|r| r.0))
    }
}

/// Multi-row parameterized insert into `recipe_ingredients` via
/// zipped-array UNNEST.
async fn insert_ingredient_rows(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: DbId,
    ingredients: &[IngredientEntry],
) -> Result<(), sqlx::Error> {
    let ingredient_ids: Vec<DbId> = ingredients.iter().map(|e| e.ingredient_id).collect();
    let quantities: Vec<f64> = ingredients.iter().map(|e| e.quantity).collect();

    sqlx::query(
        "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity)
         SELECT $1, UNNEST($2::BIGINT[]), UNNEST($3::DOUBLE PRECISION[])",
    )
    .bind(recipe_id)
    .bind(&ingredient_ids)
    .bind(&quantities)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Multi-row parameterized insert into `recipe_steps`.
async fn insert_step_rows(
    tx: &mut Transaction<'_, Postgres>,
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
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Group flat join rows and step rows into aggregates.
///
/// Emission order is first-seen order of `recipe_id`, which matches the
/// SQL `ORDER BY r.recipe_id`. A left-join row with a NULL
/// `ingredient_id` marks a recipe without ingredients and contributes
/// no entry to its list.
fn group_aggregates(rows: Vec<AggregateRow>, steps: Vec<StepRow>) -> Vec<Recipe> {
    let mut recipes: Vec<Recipe> = Vec::new();
    let mut index: HashMap<DbId, usize> = HashMap::new();

    for row in rows {
        let idx = match index.get(&row.recipe_id) {
            Some(&idx) => idx,
            None => {
                index.insert(row.recipe_id, recipes.len());
                recipes.push(Recipe {
                    recipe_id: row.recipe_id,
                    recipe_name: row.recipe_name,
                    image_url: row.image_url,
                    cooking_time: row.cooking_time,
                    description: row.description,
                    difficulty: row.difficulty,
                    user_id: row.user_id,
                    ingredients: Vec::new(),
                    steps: Vec::new(),
                });
                recipes.len() - 1
            }
        };

        if let Some(ingredient_id) = row.ingredient_id {
            recipes[idx].ingredients.push(RecipeIngredient {
                ingredient_id,
                ingredient_name: row.ingredient_name.unwrap_or_default(),
                unit: row.unit.unwrap_or_default(),
                quantity: row.quantity.unwrap_or_default(),
            });
        }
    }

    for step in steps {
        if let Some(&idx) = index.get(&step.recipe_id) {
            recipes[idx].steps.push(RecipeStep {
                step_number: step.step_number,
                instruction: step.instruction,
            });
        }
    }

    recipes
}
