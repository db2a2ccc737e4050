//! Product persistence contract and backends.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use catalogd_products::{Product, ProductDraft, ProductId};

pub use memory::InMemoryProductStore;

/// Storage failure, backend detail erased.
///
/// Callers get a single opaque variant; the concrete cause is logged at the
/// storage boundary and must not leak into HTTP responses.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations over the product table.
///
/// Each method is a direct pass-through to the backend's query execution;
/// no caching or indexing happens at this layer.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, storage-native order.
    async fn find_all(&self) -> StoreResult<Vec<Product>>;

    /// Zero-or-one product by id.
    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Products whose `available` flag equals `available`.
    async fn find_by_availability(&self, available: bool) -> StoreResult<Vec<Product>>;

    /// Products with `price < threshold` (strict).
    async fn find_by_price_less_than(&self, threshold: f64) -> StoreResult<Vec<Product>>;

    /// Case-insensitive substring match on `name`.
    async fn find_by_name_containing(&self, fragment: &str) -> StoreResult<Vec<Product>>;

    /// Products with `quantity > 0 AND available`, stricter than the plain
    /// availability filter. The two filters stay distinct; do not merge them.
    async fn find_available(&self) -> StoreResult<Vec<Product>>;

    /// Insert a new record; storage assigns the id.
    async fn insert(&self, draft: ProductDraft) -> StoreResult<Product>;

    /// Update an existing record in a single atomic step.
    ///
    /// Returns `None` when the row no longer exists.
    async fn update(&self, product: Product) -> StoreResult<Option<Product>>;

    /// Remove a record. Returns whether a row was actually deleted.
    async fn delete(&self, id: ProductId) -> StoreResult<bool>;
}
