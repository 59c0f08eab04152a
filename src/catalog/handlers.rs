//! Catalog endpoints. Mutations are registered behind the admin layers.

use std::sync::Arc;

use axum::{Extension, extract::State};

use super::models::{Product, ProductCreated, ProductRequest};
use crate::auth::Identity;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiPath, ApiResult, MessageResponse, ValidatedJson, created, ok};

/// List products
///
/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "Product list", body = Vec<Product>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Catalog"
)]
pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Product>> {
    ok(state.catalog.list().await?)
}

/// Create a product (admin)
///
/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductCreated),
        (status = 400, description = "Invalid product fields"),
        (status = 401, description = "Authentication failed"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_jwt" = [])),
    tag = "Catalog"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<Identity>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> ApiResult<ProductCreated> {
    let id = state.catalog.create(&req).await?;
    tracing::debug!(admin_id = admin.user_id, product_id = id, "create_product");

    created(ProductCreated {
        message: "Product added successfully".to_string(),
        id,
    })
}

/// Replace a product (admin)
///
/// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = MessageResponse),
        (status = 400, description = "Invalid product fields"),
        (status = 401, description = "Authentication failed"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Catalog"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> ApiResult<MessageResponse> {
    state.catalog.update(id, &req).await?;
    ok(MessageResponse::new("Product updated successfully"))
}

/// Delete a product (admin)
///
/// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Invalid product ID"),
        (status = 401, description = "Authentication failed"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product is referenced by orders")
    ),
    security(("bearer_jwt" = [])),
    tag = "Catalog"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<MessageResponse> {
    state.catalog.delete(id).await?;
    ok(MessageResponse::new("Product deleted successfully"))
}
