//! Kiroku core domain types and rules.
//!
//! Zero internal dependencies, so both the repository layer and the HTTP
//! layer can share the same validation and derivation logic.

pub mod error;
pub mod interview;
pub mod types;
