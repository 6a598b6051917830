//! Shared primitives for the forkful workspace.

pub mod types;
