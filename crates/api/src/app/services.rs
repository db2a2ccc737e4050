//! Service layer: the single choke point between HTTP and storage.
//!
//! Adds caching, operation logging, and not-found synthesis around the
//! persistence calls. Read operations log only when they actually hit
//! storage; cache hits are silent.

use std::sync::Arc;

use thiserror::Error;

use catalogd_infra::{ProductCache, ProductStore, StoreError};
use catalogd_products::{Product, ProductDraft, ProductId};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product not found with id: {0}")]
    NotFound(ProductId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct ProductService {
    store: Arc<dyn ProductStore>,
    cache: ProductCache,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            cache: ProductCache::new(),
        }
    }

    pub async fn all_products(&self) -> Result<Vec<Product>, ServiceError> {
        if let Some(products) = self.cache.all_products() {
            return Ok(products);
        }

        tracing::info!("fetching all products");
        let products = self.store.find_all().await?;
        self.cache.put_all_products(products.clone());
        Ok(products)
    }

    pub async fn product_by_id(&self, id: ProductId) -> Result<Product, ServiceError> {
        if let Some(product) = self.cache.product(id) {
            return Ok(product);
        }

        tracing::info!(%id, "fetching product");
        let product = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        self.cache.put_product(product.clone());
        Ok(product)
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        tracing::info!(name = %draft.name, "creating new product");
        let product = self.store.insert(draft).await?;
        self.cache.invalidate_writes();
        Ok(product)
    }

    /// Replace every mutable field of an existing product; the id never
    /// changes. The persisted write is a single atomic statement.
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Product, ServiceError> {
        tracing::info!(%id, "updating product");
        let mut product = self.product_by_id(id).await?;
        product.apply_draft(draft);

        let updated = self
            .store
            .update(product)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        self.cache.invalidate_writes();
        Ok(updated)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ServiceError> {
        tracing::info!(%id, "deleting product");
        let product = self.product_by_id(id).await?;
        self.store.delete(product.id).await?;
        self.cache.invalidate_writes();
        Ok(())
    }

    pub async fn available_products(&self) -> Result<Vec<Product>, ServiceError> {
        if let Some(products) = self.cache.available_products() {
            return Ok(products);
        }

        tracing::info!("fetching available products");
        let products = self.store.find_available().await?;
        self.cache.put_available_products(products.clone());
        Ok(products)
    }

    pub async fn search_products(&self, name: &str) -> Result<Vec<Product>, ServiceError> {
        tracing::info!(name, "searching products by name fragment");
        Ok(self.store.find_by_name_containing(name).await?)
    }

    pub async fn products_cheaper_than(&self, price: f64) -> Result<Vec<Product>, ServiceError> {
        tracing::info!(price, "fetching products below price threshold");
        Ok(self.store.find_by_price_less_than(price).await?)
    }
}
