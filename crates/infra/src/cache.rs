//! Process-wide response cache.
//!
//! Entries are grouped into named regions; a region is always invalidated
//! wholesale, never per key.

use dashmap::DashMap;
use tracing::debug;

use catalogd_products::{Product, ProductId};

/// Region keys for the single-entry list regions.
pub const ALL_PRODUCTS_KEY: &str = "products";
pub const AVAILABLE_PRODUCTS_KEY: &str = "available-products";

/// A named bucket of cached entries, cleared as a unit.
pub struct CacheRegion<V> {
    name: &'static str,
    entries: DashMap<String, V>,
}

impl<V: Clone> CacheRegion<V> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn put(&self, key: impl Into<String>, value: V) {
        self.entries.insert(key.into(), value);
    }

    /// Drop every entry in the region.
    pub fn clear(&self) {
        if !self.entries.is_empty() {
            debug!(region = self.name, "evicting cache region");
        }
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The catalog's cache regions, keyed by operation name (+ id for
/// single-item lookups).
pub struct ProductCache {
    lists: CacheRegion<Vec<Product>>,
    items: CacheRegion<Product>,
    available: CacheRegion<Vec<Product>>,
}

impl ProductCache {
    pub fn new() -> Self {
        Self {
            lists: CacheRegion::new("products"),
            items: CacheRegion::new("product"),
            available: CacheRegion::new("available-products"),
        }
    }

    pub fn all_products(&self) -> Option<Vec<Product>> {
        self.lists.get(ALL_PRODUCTS_KEY)
    }

    pub fn put_all_products(&self, products: Vec<Product>) {
        self.lists.put(ALL_PRODUCTS_KEY, products);
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.items.get(&id.to_string())
    }

    pub fn put_product(&self, product: Product) {
        self.items.put(product.id.to_string(), product);
    }

    pub fn available_products(&self) -> Option<Vec<Product>> {
        self.available.get(AVAILABLE_PRODUCTS_KEY)
    }

    pub fn put_available_products(&self, products: Vec<Product>) {
        self.available.put(AVAILABLE_PRODUCTS_KEY, products);
    }

    /// Wholesale eviction after any write: clears the `products` and
    /// `product` regions. The `available-products` region is intentionally
    /// not part of the evict set.
    pub fn invalidate_writes(&self) {
        self.lists.clear();
        self.items.clear();
    }
}

impl Default for ProductCache {
    fn default() -> Self {
        Self::new()
    }
}
