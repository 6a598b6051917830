//! Typed response payloads shared across handlers.
//!
//! Success bodies reuse the exact message strings the frontend matches
//! on, so they are `&'static str` constants at call sites rather than
//! ad-hoc `json!` literals.

use forkful_core::types::DbId;
use serde::Serialize;

/// Plain `{"message": ...}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Response for a successful recipe creation.
#[derive(Debug, Serialize)]
pub struct RecipeCreated {
    pub message: &'static str,
    pub recipe_id: DbId,
}
