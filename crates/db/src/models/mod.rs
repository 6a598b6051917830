//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for create/update payloads where the repository
//!   consumes a whole document rather than scalar arguments

pub mod ingredient;
pub mod recipe;
pub mod recipe_ingredient;
