pub mod health;
pub mod ingredient;
pub mod recipe;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Routes are mounted at the root with no version prefix -- these exact
/// paths are the contract the frontend consumes.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(recipe::router()).merge(ingredient::router())
}
