//! Products domain module.
//!
//! This crate contains the catalog's sole entity and its validation rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage).

pub mod product;

pub use product::{Product, ProductDraft, ProductId};
