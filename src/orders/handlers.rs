//! Order endpoints. Both routes sit behind the token layer.

use std::sync::Arc;

use axum::{Extension, extract::State};

use super::models::{Order, OrderPlaced, PlaceOrderRequest};
use crate::auth::Identity;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResult, ValidatedJson, created, ok};

/// Place an order
///
/// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderPlaced),
        (status = 400, description = "Invalid order, unknown product or insufficient stock"),
        (status = 401, description = "Authentication failed"),
        (status = 500, description = "Failed to create order")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    ValidatedJson(req): ValidatedJson<PlaceOrderRequest>,
) -> ApiResult<OrderPlaced> {
    let order_id = state.orders.place_order(&identity, req).await?;

    created(OrderPlaced {
        message: "Order placed successfully".to_string(),
        order_id,
    })
}

/// List orders visible to the caller, newest first
///
/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "Orders", body = Vec<Order>),
        (status = 401, description = "Authentication failed"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<Order>> {
    ok(state.orders.list_orders(&identity).await?)
}
