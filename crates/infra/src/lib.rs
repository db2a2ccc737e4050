//! `catalogd-infra` — persistence and caching behind trait seams.
//!
//! Domain crates stay IO-free; everything that touches storage or shared
//! mutable cache state lives here.

pub mod cache;
pub mod store;

pub use cache::{CacheRegion, ProductCache};
pub use store::{InMemoryProductStore, ProductStore, StoreError};

#[cfg(feature = "postgres")]
pub use store::postgres::PostgresProductStore;
