//! In-memory product store for dev/test.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use catalogd_products::{Product, ProductDraft, ProductId};

use super::{ProductStore, StoreResult};

/// In-memory store: `BTreeMap` keyed by id behind an `RwLock`.
///
/// Read-modify-write operations hold the write lock for their full duration,
/// so concurrent writers never observe partial application.
#[derive(Debug)]
pub struct InMemoryProductStore {
    rows: RwLock<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn all_matching(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        let rows = match self.rows.read() {
            Ok(r) => r,
            Err(_) => return vec![],
        };
        rows.values().filter(|p| predicate(p)).cloned().collect()
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.all_matching(|_| true))
    }

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let rows = match self.rows.read() {
            Ok(r) => r,
            Err(_) => return Ok(None),
        };
        Ok(rows.get(&id.as_i64()).cloned())
    }

    async fn find_by_availability(&self, available: bool) -> StoreResult<Vec<Product>> {
        Ok(self.all_matching(|p| p.available == available))
    }

    async fn find_by_price_less_than(&self, threshold: f64) -> StoreResult<Vec<Product>> {
        Ok(self.all_matching(|p| p.price < threshold))
    }

    async fn find_by_name_containing(&self, fragment: &str) -> StoreResult<Vec<Product>> {
        let needle = fragment.to_lowercase();
        Ok(self.all_matching(|p| p.name.to_lowercase().contains(&needle)))
    }

    async fn find_available(&self) -> StoreResult<Vec<Product>> {
        Ok(self.all_matching(|p| p.quantity > 0 && p.available))
    }

    async fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product::from_draft(ProductId::new(id), draft);
        if let Ok(mut rows) = self.rows.write() {
            rows.insert(id, product.clone());
        }
        Ok(product)
    }

    async fn update(&self, product: Product) -> StoreResult<Option<Product>> {
        let mut rows = match self.rows.write() {
            Ok(r) => r,
            Err(_) => return Ok(None),
        };
        let key = product.id.as_i64();
        if !rows.contains_key(&key) {
            return Ok(None);
        }
        rows.insert(key, product.clone());
        Ok(Some(product))
    }

    async fn delete(&self, id: ProductId) -> StoreResult<bool> {
        let mut rows = match self.rows.write() {
            Ok(r) => r,
            Err(_) => return Ok(false),
        };
        Ok(rows.remove(&id.as_i64()).is_some())
    }
}
