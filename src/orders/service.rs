use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

use super::models::{Order, OrderScope, PlaceOrderRequest};
use super::repository::OrderRepository;
use crate::auth::Identity;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order must contain at least one item")]
    EmptyItems,

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: i64, quantity: i32 },

    #[error("Invalid price for product {0}")]
    InvalidPrice(i64),

    #[error("Invalid total amount")]
    InvalidTotal,

    #[error("Total amount {declared} does not match item sum {computed}")]
    TotalMismatch { declared: Decimal, computed: Decimal },

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error(
        "Insufficient stock for product {product_id}: available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: i64,
        available: i32,
        requested: i32,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Check a request before any store access and return the computed total.
///
/// The declared total must equal Σ quantity × price of the request's own
/// items; catalog prices are not consulted.
pub fn validate_order(req: &PlaceOrderRequest) -> Result<Decimal, OrderError> {
    if req.items.is_empty() {
        return Err(OrderError::EmptyItems);
    }
    if req.total_amount.is_sign_negative() {
        return Err(OrderError::InvalidTotal);
    }

    let mut computed = Decimal::ZERO;
    for item in &req.items {
        if item.quantity <= 0 {
            return Err(OrderError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
        if item.price.is_sign_negative() {
            return Err(OrderError::InvalidPrice(item.product_id));
        }
        computed = item
            .price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| computed.checked_add(line))
            .ok_or(OrderError::InvalidTotal)?;
    }

    if computed != req.total_amount {
        return Err(OrderError::TotalMismatch {
            declared: req.total_amount,
            computed,
        });
    }
    Ok(computed)
}

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    /// Place an order for the caller. All-or-nothing.
    pub async fn place_order(
        &self,
        identity: &Identity,
        req: PlaceOrderRequest,
    ) -> Result<i64, OrderError> {
        validate_order(&req)?;

        let order_id = self
            .orders
            .place_order(identity.user_id, &req.items, req.total_amount)
            .await
            .inspect_err(|e| {
                tracing::warn!(user_id = identity.user_id, "Order rejected: {}", e);
            })?;

        tracing::info!(
            user_id = identity.user_id,
            order_id,
            items = req.items.len(),
            total_amount = %req.total_amount,
            "Order placed"
        );
        Ok(order_id)
    }

    /// Customers see their own orders, admins see every order. Newest first.
    pub async fn list_orders(&self, identity: &Identity) -> Result<Vec<Order>, OrderError> {
        let scope = if identity.is_admin() {
            OrderScope::All
        } else {
            OrderScope::User(identity.user_id)
        };
        self.orders.list_orders(scope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::catalog::repository::MockProductRepository;
    use crate::orders::models::OrderItemRequest;
    use crate::orders::repository::MockOrderRepository;

    fn customer(user_id: i64) -> Identity {
        Identity {
            user_id,
            email: format!("user{user_id}@example.com"),
            role: Role::Customer,
        }
    }

    fn item(product_id: i64, quantity: i32, price: i64) -> OrderItemRequest {
        OrderItemRequest {
            product_id,
            quantity,
            price: Decimal::from(price),
        }
    }

    fn setup() -> (Arc<MockProductRepository>, Arc<MockOrderRepository>, OrderService) {
        let products = Arc::new(MockProductRepository::new());
        let orders = Arc::new(MockOrderRepository::new(products.clone()));
        let svc = OrderService::new(orders.clone());
        (products, orders, svc)
    }

    #[tokio::test]
    async fn test_place_order_decrements_stock() {
        let (products, orders, svc) = setup();
        let pid = products.seed("Tomato seeds", Decimal::TEN, 5);

        let order_id = svc
            .place_order(
                &customer(1),
                PlaceOrderRequest {
                    items: vec![item(pid, 2, 10)],
                    total_amount: Decimal::from(20),
                },
            )
            .await
            .unwrap();

        assert_eq!(products.stock_of(pid), Some(3));
        assert_eq!(orders.order_count(), 1);
        let items = orders.items_of(order_id);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, Decimal::TEN);
    }

    #[tokio::test]
    async fn test_unknown_product_changes_nothing() {
        let (products, orders, svc) = setup();
        let pid = products.seed("Hoe", Decimal::TEN, 5);

        let result = svc
            .place_order(
                &customer(1),
                PlaceOrderRequest {
                    items: vec![item(pid, 2, 10), item(999, 1, 10)],
                    total_amount: Decimal::from(30),
                },
            )
            .await;

        assert!(matches!(result, Err(OrderError::ProductNotFound(999))));
        assert_eq!(products.stock_of(pid), Some(5), "first item not decremented");
        assert_eq!(orders.order_count(), 0);
        assert_eq!(orders.item_count(), 0);
    }

    #[tokio::test]
    async fn test_insufficient_stock_changes_nothing() {
        let (products, orders, svc) = setup();
        let pid = products.seed("Fertilizer", Decimal::ONE, 1);

        let result = svc
            .place_order(
                &customer(1),
                PlaceOrderRequest {
                    items: vec![item(pid, 2, 1)],
                    total_amount: Decimal::from(2),
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(OrderError::InsufficientStock {
                available: 1,
                requested: 2,
                ..
            })
        ));
        assert_eq!(products.stock_of(pid), Some(1));
        assert_eq!(orders.order_count(), 0);
    }

    #[tokio::test]
    async fn test_total_mismatch_rejected_before_store() {
        let (products, orders, svc) = setup();
        let pid = products.seed("Rake", Decimal::TEN, 5);

        let result = svc
            .place_order(
                &customer(1),
                PlaceOrderRequest {
                    items: vec![item(pid, 2, 10)],
                    total_amount: Decimal::from(5),
                },
            )
            .await;

        assert!(matches!(result, Err(OrderError::TotalMismatch { .. })));
        assert_eq!(products.stock_of(pid), Some(5));
        assert_eq!(orders.order_count(), 0);
    }

    #[test]
    fn test_validate_order() {
        let ok = PlaceOrderRequest {
            items: vec![item(1, 2, 10), item(2, 1, 5)],
            total_amount: Decimal::from(25),
        };
        assert_eq!(validate_order(&ok).unwrap(), Decimal::from(25));

        let empty = PlaceOrderRequest {
            items: vec![],
            total_amount: Decimal::ZERO,
        };
        assert!(matches!(validate_order(&empty), Err(OrderError::EmptyItems)));

        let zero_qty = PlaceOrderRequest {
            items: vec![item(1, 0, 10)],
            total_amount: Decimal::ZERO,
        };
        assert!(matches!(
            validate_order(&zero_qty),
            Err(OrderError::InvalidQuantity { quantity: 0, .. })
        ));

        let negative_price = PlaceOrderRequest {
            items: vec![item(1, 1, -3)],
            total_amount: Decimal::from(-3),
        };
        assert!(validate_order(&negative_price).is_err());
    }

    #[tokio::test]
    async fn test_list_orders_scoped_by_role() {
        let (products, _orders, svc) = setup();
        let pid = products.seed("Seeds", Decimal::ONE, 10);
        let order = || PlaceOrderRequest {
            items: vec![item(pid, 1, 1)],
            total_amount: Decimal::ONE,
        };

        let first = svc.place_order(&customer(1), order()).await.unwrap();
        svc.place_order(&customer(2), order()).await.unwrap();
        let third = svc.place_order(&customer(1), order()).await.unwrap();

        let mine: Vec<i64> = svc
            .list_orders(&customer(1))
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(mine, vec![third, first]);

        let admin = Identity {
            user_id: 100,
            email: "admin@example.com".to_string(),
            role: Role::Admin,
        };
        assert_eq!(svc.list_orders(&admin).await.unwrap().len(), 3);
    }
}
