//! Postgres-backed product store.
//!
//! Runtime queries with manual row mapping; no compile-time database is
//! needed to build this crate.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use catalogd_products::{Product, ProductDraft, ProductId};

use super::{ProductStore, StoreError, StoreResult};

/// Product store over a `PgPool`.
///
/// Single-statement writes (`INSERT/UPDATE/DELETE ... RETURNING`) delegate
/// atomicity and per-row serialization to the engine.
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await.map_err(db_err)?;
        Ok(Self::new(pool))
    }

    /// Create the products table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id          BIGSERIAL PRIMARY KEY,
                name        TEXT NOT NULL,
                description TEXT,
                price       DOUBLE PRECISION NOT NULL,
                quantity    BIGINT NOT NULL,
                available   BOOLEAN NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.into())
}

fn row_to_product(row: &PgRow) -> Product {
    Product {
        id: ProductId::new(row.get("id")),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        quantity: row.get("quantity"),
        available: row.get("available"),
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, quantity, available FROM products",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_product).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row = sqlx::query(
            "SELECT id, name, description, price, quantity, available \
             FROM products WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_product))
    }

    async fn find_by_availability(&self, available: bool) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, quantity, available \
             FROM products WHERE available = $1",
        )
        .bind(available)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_product).collect())
    }

    async fn find_by_price_less_than(&self, threshold: f64) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, quantity, available \
             FROM products WHERE price < $1",
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_product).collect())
    }

    async fn find_by_name_containing(&self, fragment: &str) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, quantity, available \
             FROM products WHERE name ILIKE '%' || $1 || '%'",
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_product).collect())
    }

    async fn find_available(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price, quantity, available \
             FROM products WHERE quantity > 0 AND available = TRUE",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.iter().map(row_to_product).collect())
    }

    async fn insert(&self, draft: ProductDraft) -> StoreResult<Product> {
        let row = sqlx::query(
            "INSERT INTO products (name, description, price, quantity, available) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, description, price, quantity, available",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.quantity)
        .bind(draft.available)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row_to_product(&row))
    }

    async fn update(&self, product: Product) -> StoreResult<Option<Product>> {
        let row = sqlx::query(
            "UPDATE products \
             SET name = $2, description = $3, price = $4, quantity = $5, available = $6 \
             WHERE id = $1 \
             RETURNING id, name, description, price, quantity, available",
        )
        .bind(product.id.as_i64())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.available)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_product))
    }

    async fn delete(&self, id: ProductId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }
}
