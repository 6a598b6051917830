//! Route definitions for the recipe aggregate and its step
//! sub-resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{recipe, step};
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// POST   /recipes                            create
/// GET    /recipes                            list_all
/// GET    /recipes/user/{user_id}             list_by_user
/// GET    /recipes/{id}                       get_by_id
/// PATCH  /recipes/{id}                       update
/// DELETE /recipes/{id}                       delete
/// GET    /recipes/{id}/image                 get_image
/// PUT    /recipes/{id}/image                 set_image
/// POST   /recipes/{id}/steps                 append_steps
/// PATCH  /recipes/{id}/steps                 update_steps
/// DELETE /recipes/{id}/steps/{step_number}   delete_step
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(recipe::list_all).post(recipe::create))
        .route("/recipes/user/{user_id}", get(recipe::list_by_user))
        .route(
            "/recipes/{id}",
            get(recipe::get_by_id)
                .patch(recipe::update)
                .delete(recipe::delete),
        )
        .route(
            "/recipes/{id}/image",
            get(recipe::get_image).put(recipe::set_image),
        )
        .route(
            "/recipes/{id}/steps",
            post(step::append_steps).patch(step::update_steps),
        )
        .route(
            "/recipes/{id}/steps/{step_number}",
            delete(step::delete_step),
        )
}
