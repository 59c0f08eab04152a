use std::sync::Arc;
use thiserror::Error;

use super::models::{Product, ProductRequest};
use super::repository::ProductRepository;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Product {0} is referenced by existing orders")]
    InUse(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Product catalog operations. Role checks happen in the access-control
/// layer before any of these run.
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    hide_out_of_stock: bool,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>, hide_out_of_stock: bool) -> Self {
        Self {
            products,
            hide_out_of_stock,
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        self.products.list(self.hide_out_of_stock).await
    }

    pub async fn create(&self, req: &ProductRequest) -> Result<i64, CatalogError> {
        let id = self.products.insert(req).await?;
        tracing::info!(product_id = id, name = %req.name, "Product created");
        Ok(id)
    }

    /// Full replacement; last write wins
    pub async fn update(&self, id: i64, req: &ProductRequest) -> Result<(), CatalogError> {
        if !self.products.update(id, req).await? {
            return Err(CatalogError::NotFound(id));
        }
        tracing::info!(product_id = id, "Product updated");
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), CatalogError> {
        if !self.products.delete(id).await? {
            return Err(CatalogError::NotFound(id));
        }
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}
