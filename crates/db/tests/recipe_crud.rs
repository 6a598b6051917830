//! Integration tests for the recipe repository layer.
//!
//! Exercises aggregate assembly and the transactional write paths
//! against a real database:
//! - Create with children, rollback on failure
//! - Left-join null filtering and emission order
//! - Full child replacement on update
//! - Cascading delete and step renumbering

use assert_matches::assert_matches;
use sqlx::PgPool;

use forkful_db::models::recipe::{CreateRecipe, IngredientEntry, RecipeStep, UpdateRecipe};
use forkful_db::repositories::{IngredientRepo, RecipeRepo, StepRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_ingredient(pool: &PgPool, name: &str, unit: &str) -> i64 {
    IngredientRepo::create(pool, name, unit)
        .await
        .expect("ingredient insert failed")
        .ingredient_id
}

fn new_recipe(name: &str, user_id: i64) -> CreateRecipe {
    CreateRecipe {
        recipe_name: name.to_string(),
        user_id,
        image_url: None,
        cooking_time: Some(30),
        description: Some("test recipe".to_string()),
        difficulty: Some("Easy".to_string()),
        ingredients: vec![],
        steps: vec![],
    }
}

fn step(step_number: i32, instruction: &str) -> RecipeStep {
    RecipeStep {
        step_number,
        instruction: instruction.to_string(),
    }
}

async fn table_count(pool: &PgPool, table: &str) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {table}");
    let row: (i64,) = sqlx::query_as(&query).fetch_one(pool).await.unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Create + aggregate read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_then_find_returns_full_aggregate(pool: PgPool) {
    let flour = seed_ingredient(&pool, "Flour", "g").await;
    let salt = seed_ingredient(&pool, "Salt", "tsp").await;

    let mut input = new_recipe("Bread", 7);
    input.ingredients = vec![
        IngredientEntry {
            ingredient_id: flour,
            quantity: 500.0,
        },
        IngredientEntry {
            ingredient_id: salt,
            quantity: 2.0,
        },
    ];
    input.steps = vec![step(1, "Mix"), step(2, "Knead"), step(3, "Bake")];

    let recipe_id = RecipeRepo::create(&pool, &input).await.unwrap();

    let recipe = RecipeRepo::find_by_id(&pool, recipe_id)
        .await
        .unwrap()
        .expect("recipe should exist");

    assert_eq!(recipe.recipe_id, recipe_id);
    assert_eq!(recipe.recipe_name, "Bread");
    assert_eq!(recipe.user_id, 7);
    assert_eq!(recipe.cooking_time, Some(30));
    assert_eq!(recipe.difficulty.as_deref(), Some("Easy"));

    assert_eq!(recipe.ingredients.len(), 2);
    let flour_entry = recipe
        .ingredients
        .iter()
        .find(|i| i.ingredient_id == flour)
        .expect("flour entry present");
    assert_eq!(flour_entry.ingredient_name, "Flour");
    assert_eq!(flour_entry.unit, "g");
    assert_eq!(flour_entry.quantity, 500.0);

    assert_eq!(recipe.steps.len(), 3);
    assert_eq!(recipe.steps[0].step_number, 1);
    assert_eq!(recipe.steps[0].instruction, "Mix");
    assert_eq!(recipe.steps[2].instruction, "Bake");
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_with_unknown_ingredient_rolls_back_everything(pool: PgPool) {
    let mut input = new_recipe("Doomed", 7);
    input.ingredients = vec![IngredientEntry {
        ingredient_id: 999_999,
        quantity: 1.0,
    }];
    input.steps = vec![step(1, "Never happens")];

    let result = RecipeRepo::create(&pool, &input).await;
    assert!(result.is_err(), "unknown ingredient must fail the create");

    // The recipe row inserted in phase one must be gone too.
    assert_eq!(table_count(&pool, "recipes").await, 0);
    assert_eq!(table_count(&pool, "recipe_ingredients").await, 0);
    assert_eq!(table_count(&pool, "recipe_steps").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_with_empty_children_skips_child_inserts(pool: PgPool) {
    let recipe_id = RecipeRepo::create(&pool, &new_recipe("Plain", 1))
        .await
        .unwrap();

    let recipe = RecipeRepo::find_by_id(&pool, recipe_id)
        .await
        .unwrap()
        .unwrap();
    assert!(recipe.ingredients.is_empty());
    assert!(recipe.steps.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn find_by_id_returns_none_for_missing_recipe(pool: PgPool) {
    let found = RecipeRepo::find_by_id(&pool, 424_242).await.unwrap();
    assert_matches!(found, None);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_all_emits_recipes_in_id_order_with_null_filtering(pool: PgPool) {
    let flour = seed_ingredient(&pool, "Flour", "g").await;

    // First recipe has an ingredient, second has none: its left-join
    // row carries NULL ingredient columns and must yield an empty list.
    let mut first = new_recipe("First", 1);
    first.ingredients = vec![IngredientEntry {
        ingredient_id: flour,
        quantity: 100.0,
    }];
    let first_id = RecipeRepo::create(&pool, &first).await.unwrap();
    let second_id = RecipeRepo::create(&pool, &new_recipe("Second", 2))
        .await
        .unwrap();

    let recipes = RecipeRepo::list_all(&pool).await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].recipe_id, first_id);
    assert_eq!(recipes[1].recipe_id, second_id);
    assert_eq!(recipes[0].ingredients.len(), 1);
    assert!(recipes[1].ingredients.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_by_user_filters_to_owner(pool: PgPool) {
    let mut mine = new_recipe("Mine", 1);
    mine.steps = vec![step(1, "Cook")];
    RecipeRepo::create(&pool, &mine).await.unwrap();
    RecipeRepo::create(&pool, &new_recipe("Theirs", 2))
        .await
        .unwrap();

    let recipes = RecipeRepo::list_by_user(&pool, 1).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].recipe_name, "Mine");
    assert_eq!(recipes[0].steps.len(), 1);

    let none = RecipeRepo::list_by_user(&pool, 99).await.unwrap();
    assert!(none.is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn update_replaces_scalars_and_children(pool: PgPool) {
    let flour = seed_ingredient(&pool, "Flour", "g").await;
    let sugar = seed_ingredient(&pool, "Sugar", "g").await;

    let mut input = new_recipe("Cake v1", 7);
    input.ingredients = vec![IngredientEntry {
        ingredient_id: flour,
        quantity: 300.0,
    }];
    input.steps = vec![step(1, "Mix"), step(2, "Bake")];
    let recipe_id = RecipeRepo::create(&pool, &input).await.unwrap();

    let update = UpdateRecipe {
        recipe_name: "Cake v2".to_string(),
        image_url: Some("/img/cake.png".to_string()),
        cooking_time: Some(45),
        description: Some("better cake".to_string()),
        difficulty: Some("Medium".to_string()),
        ingredients: vec![IngredientEntry {
            ingredient_id: sugar,
            quantity: 150.0,
        }],
        steps: vec![step(1, "Whisk")],
    };
    let updated = RecipeRepo::update(&pool, recipe_id, &update).await.unwrap();
    assert!(updated);

    let recipe = RecipeRepo::find_by_id(&pool, recipe_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(recipe.recipe_name, "Cake v2");
    assert_eq!(recipe.cooking_time, Some(45));
    assert_eq!(recipe.difficulty.as_deref(), Some("Medium"));

    // Old children must be fully replaced, not merged.
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].ingredient_id, sugar);
    assert_eq!(recipe.steps.len(), 1);
    assert_eq!(recipe.steps[0].instruction, "Whisk");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_missing_recipe_returns_false(pool: PgPool) {
    let update = UpdateRecipe {
        recipe_name: "Ghost".to_string(),
        image_url: None,
        cooking_time: None,
        description: None,
        difficulty: None,
        ingredients: vec![],
        steps: vec![],
    };
    let updated = RecipeRepo::update(&pool, 424_242, &update).await.unwrap();
    assert!(!updated);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn delete_removes_recipe_and_children(pool: PgPool) {
    let flour = seed_ingredient(&pool, "Flour", "g").await;

    let mut input = new_recipe("Short-lived", 7);
    input.ingredients = vec![IngredientEntry {
        ingredient_id: flour,
        quantity: 1.0,
    }];
    input.steps = vec![step(1, "Cook")];
    let recipe_id = RecipeRepo::create(&pool, &input).await.unwrap();

    let deleted = RecipeRepo::delete(&pool, recipe_id).await.unwrap();
    assert!(deleted);

    assert_matches!(RecipeRepo::find_by_id(&pool, recipe_id).await.unwrap(), None);
    assert_eq!(table_count(&pool, "recipe_ingredients").await, 0);
    assert_eq!(table_count(&pool, "recipe_steps").await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_missing_recipe_returns_false(pool: PgPool) {
    let deleted = RecipeRepo::delete(&pool, 424_242).await.unwrap();
    assert!(!deleted);
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn delete_step_renumbers_remaining_steps(pool: PgPool) {
    let mut input = new_recipe("Stepped", 7);
    input.steps = vec![
        step(1, "One"),
        step(2, "Two"),
        step(3, "Three"),
        step(4, "Four"),
    ];
    let recipe_id = RecipeRepo::create(&pool, &input).await.unwrap();

    let deleted = StepRepo::delete_and_renumber(&pool, recipe_id, 2)
        .await
        .unwrap();
    assert!(deleted);

    // Former steps 3 and 4 close the gap: [1,2,3] with "Three" at 2.
    let recipe = RecipeRepo::find_by_id(&pool, recipe_id)
        .await
        .unwrap()
        .unwrap();
    let numbered: Vec<(i32, &str)> = recipe
        .steps
        .iter()
        .map(|s| (s.step_number, s.instruction.as_str()))
        .collect();
    assert_eq!(numbered, vec![(1, "One"), (2, "Three"), (3, "Four")]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_missing_step_returns_false(pool: PgPool) {
    let recipe_id = RecipeRepo::create(&pool, &new_recipe("No steps", 7))
        .await
        .unwrap();

    let deleted = StepRepo::delete_and_renumber(&pool, recipe_id, 1)
        .await
        .unwrap();
    assert!(!deleted);
}

#[sqlx::test(migrations = "../../migrations")]
async fn append_then_update_instructions(pool: PgPool) {
    let recipe_id = RecipeRepo::create(&pool, &new_recipe("Evolving", 7))
        .await
        .unwrap();

    StepRepo::append(&pool, recipe_id, &[step(1, "Draft"), step(2, "Final")])
        .await
        .unwrap();

    // The empty-instruction entry is skipped; step 1 is rewritten.
    StepRepo::update_instructions(&pool, recipe_id, &[step(1, "Polished"), step(2, "")])
        .await
        .unwrap();

    let recipe = RecipeRepo::find_by_id(&pool, recipe_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recipe.steps[0].instruction, "Polished");
    assert_eq!(recipe.steps[1].instruction, "Final");
}

// ---------------------------------------------------------------------------
// Image side channel
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn set_image_url_patches_single_field(pool: PgPool) {
    let recipe_id = RecipeRepo::create(&pool, &new_recipe("Photogenic", 7))
        .await
        .unwrap();

    let row = RecipeRepo::set_image_url(&pool, recipe_id, "/food_image/r1.png")
        .await
        .unwrap()
        .expect("recipe should exist");
    assert_eq!(row.image_url.as_deref(), Some("/food_image/r1.png"));
    assert_eq!(row.recipe_name, "Photogenic");

    let url = RecipeRepo::find_image_url(&pool, recipe_id)
        .await
        .unwrap()
        .expect("recipe should exist");
    assert_eq!(url.as_deref(), Some("/food_image/r1.png"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn set_image_url_missing_recipe_returns_none(pool: PgPool) {
    let row = RecipeRepo::set_image_url(&pool, 424_242, "/nope.png")
        .await
        .unwrap();
    assert_matches!(row, None);
}
