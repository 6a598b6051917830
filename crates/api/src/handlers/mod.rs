//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource
//! group. Handlers delegate to the corresponding repository in
//! `forkful_db` and map errors via [`crate::error::AppError`].

pub mod ingredient;
pub mod recipe;
pub mod recipe_ingredient;
pub mod step;
