//! Order types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::gateway::types::validate_money;

/// Status of every freshly placed order
pub const ORDER_STATUS_PENDING: &str = "pending";

/// One requested line item. `price` is the unit price the client saw; it is
/// stored as a snapshot and never re-read from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    #[serde(alias = "productId")]
    #[schema(example = 1)]
    pub product_id: i64,
    #[validate(range(min = 1))]
    #[schema(example = 2)]
    pub quantity: i32,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "10.00")]
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemRequest>,
    #[serde(alias = "totalAmount")]
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "20.00")]
    pub total_amount: Decimal,
}

/// Row in `orders`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    #[schema(value_type = String, example = "20.00")]
    pub total_amount: Decimal,
    #[schema(example = "pending")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Row in `order_items`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderPlaced {
    pub message: String,
    pub order_id: i64,
}

/// Which orders a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    User(i64),
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_snake_and_camel_case() {
        let snake: PlaceOrderRequest = serde_json::from_str(
            r#"{"items":[{"product_id":1,"quantity":2,"price":10}],"total_amount":20}"#,
        )
        .unwrap();
        let camel: PlaceOrderRequest = serde_json::from_str(
            r#"{"items":[{"productId":1,"quantity":2,"price":10}],"totalAmount":20}"#,
        )
        .unwrap();

        assert_eq!(snake.items[0].product_id, camel.items[0].product_id);
        assert_eq!(snake.total_amount, camel.total_amount);
        assert!(snake.validate().is_ok());
    }

    #[test]
    fn test_empty_items_and_bad_quantity_rejected() {
        let empty = PlaceOrderRequest {
            items: vec![],
            total_amount: Decimal::ZERO,
        };
        assert!(empty.validate().is_err());

        let zero_qty = PlaceOrderRequest {
            items: vec![OrderItemRequest {
                product_id: 1,
                quantity: 0,
                price: Decimal::TEN,
            }],
            total_amount: Decimal::ZERO,
        };
        assert!(zero_qty.validate().is_err());
    }
}
