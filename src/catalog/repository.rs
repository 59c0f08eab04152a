//! Product storage

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{Product, ProductRequest};
use super::service::CatalogError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self, in_stock_only: bool) -> Result<Vec<Product>, CatalogError>;

    async fn insert(&self, product: &ProductRequest) -> Result<i64, CatalogError>;

    /// Returns `false` when no product has this id
    async fn update(&self, id: i64, product: &ProductRequest) -> Result<bool, CatalogError>;

    /// Returns `false` when no product has this id
    async fn delete(&self, id: i64) -> Result<bool, CatalogError>;
}

/// PostgreSQL-backed product repository
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self, in_stock_only: bool) -> Result<Vec<Product>, CatalogError> {
        let sql = if in_stock_only {
            r#"SELECT id, name, category, description, price, stock, image_url
               FROM products WHERE stock > 0 ORDER BY id"#
        } else {
            r#"SELECT id, name, category, description, price, stock, image_url
               FROM products ORDER BY id"#
        };

        let rows = sqlx::query_as::<_, Product>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, product: &ProductRequest) -> Result<i64, CatalogError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO products (name, category, description, price, stock, image_url)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id"#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, id: i64, product: &ProductRequest) -> Result<bool, CatalogError> {
        let result = sqlx::query(
            r#"UPDATE products
               SET name = $1, category = $2, description = $3,
                   price = $4, stock = $5, image_url = $6
               WHERE id = $7"#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(&product.image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, CatalogError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(r) => Ok(r.rows_affected() > 0),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(CatalogError::InUse(id))
            }
            Err(e) => Err(CatalogError::Database(e)),
        }
    }
}


#[cfg(test)]
pub use mock::MockProductRepository;
