//! Order placement and history

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use models::{Order, OrderItem, OrderItemRequest, OrderPlaced, OrderScope, PlaceOrderRequest};
pub use repository::{OrderRepository, PgOrderRepository};
pub use service::{OrderError, OrderService, validate_order};
