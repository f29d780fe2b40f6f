//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the store and map errors via [`crate::error::AppError`].

pub mod interview;
