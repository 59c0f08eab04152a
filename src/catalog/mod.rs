//! Product catalog

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use models::{Product, ProductCreated, ProductRequest};
pub use repository::{PgProductRepository, ProductRepository};
pub use service::{CatalogError, CatalogService};
