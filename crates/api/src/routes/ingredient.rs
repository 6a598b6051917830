//! Route definitions for ingredient master data and recipe-ingredient
//! links.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{ingredient, recipe_ingredient};
use crate::state::AppState;

/// Routes mounted at `/ingredients` and `/recipe-ingredients`.
///
/// ```text
/// GET    /ingredients                 list
/// POST   /ingredients                 create
/// PATCH  /ingredients/{id}            update
/// DELETE /ingredients/{id}            delete
///
/// GET    /recipe-ingredients          list_all
/// POST   /recipe-ingredients          create
/// GET    /recipe-ingredients/{id}     list_by_recipe (id is a recipe id)
/// PATCH  /recipe-ingredients/{id}     update_quantity
/// DELETE /recipe-ingredients/{id}     delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/ingredients",
            get(ingredient::list).post(ingredient::create),
        )
        .route(
            "/ingredients/{id}",
            patch(ingredient::update).delete(ingredient::delete),
        )
        .route(
            "/recipe-ingredients",
            get(recipe_ingredient::list_all).post(recipe_ingredient::create),
        )
        .route(
            "/recipe-ingredients/{id}",
            get(recipe_ingredient::list_by_recipe)
                .patch(recipe_ingredient::update_quantity)
                .delete(recipe_ingredient::delete),
        )
}
