//! Order storage
//!
//! `place_order` is the only multi-statement unit in the system: the order
//! row, its items and every stock decrement commit together or not at all.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::models::{ORDER_STATUS_PENDING, Order, OrderItemRequest, OrderScope};
use super::service::OrderError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Atomically create the order, its items and decrement stock.
    /// Nothing is persisted unless the whole order succeeds.
    async fn place_order(
        &self,
        user_id: i64,
        items: &[OrderItemRequest],
        total_amount: Decimal,
    ) -> Result<i64, OrderError>;

    /// Newest first
    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<Order>, OrderError>;
}

/// Items sorted by product id. Row locks taken in this order cannot
/// deadlock against another order touching the same products.
fn in_lock_order(items: &[OrderItemRequest]) -> Vec<&OrderItemRequest> {
    let mut sorted: Vec<&OrderItemRequest> = items.iter().collect();
    sorted.sort_by_key(|item| item.product_id);
    sorted
}

/// PostgreSQL-backed order repository
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn place_order(
        &self,
        user_id: i64,
        items: &[OrderItemRequest],
        total_amount: Decimal,
    ) -> Result<i64, OrderError> {
        let mut tx = self.pool.begin().await?;

        // 1. Order header
        let order_id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO orders (user_id, total_amount, status)
               VALUES ($1, $2, $3)
               RETURNING id"#,
        )
        .bind(user_id)
        .bind(total_amount)
        .bind(ORDER_STATUS_PENDING)
        .fetch_one(&mut *tx)
        .await?;

        for item in in_lock_order(items) {
            // 2. Conditional decrement: never drives stock negative
            let updated = sqlx::query(
                "UPDATE products SET stock = stock - $1 WHERE id = $2 AND stock >= $1",
            )
            .bind(item.quantity)
            .bind(item.product_id)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                let available: Option<i32> =
                    sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
                        .bind(item.product_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                tx.rollback().await?;

                return Err(match available {
                    None => OrderError::ProductNotFound(item.product_id),
                    Some(available) => OrderError::InsufficientStock {
                        product_id: item.product_id,
                        available,
                        requested: item.quantity,
                    },
                });
            }

            // 3. Line item with the price snapshot
            sqlx::query(
                r#"INSERT INTO order_items (order_id, product_id, quantity, price)
                   VALUES ($1, $2, $3, $4)"#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        // Any early `?` return drops `tx`, which rolls back.
        tx.commit().await?;
        Ok(order_id)
    }

    async fn list_orders(&self, scope: OrderScope) -> Result<Vec<Order>, OrderError> {
        let orders = match scope {
            OrderScope::All => {
                sqlx::query_as::<_, Order>(
                    r#"SELECT id, user_id, total_amount, status, created_at
                       FROM orders ORDER BY created_at DESC, id DESC"#,
                )
                .fetch_all(&self.pool)
                .await?
            }
            OrderScope::User(user_id) => {
                sqlx::query_as::<_, Order>(
                    r#"SELECT id, user_id, total_amount, status, created_at
                       FROM orders WHERE user_id = $1
                       ORDER BY created_at DESC, id DESC"#,
                )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(orders)
    }
}


#[cfg(test)]
pub use mock::MockOrderRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PgProductRepository, ProductRepository, ProductRequest};
    use crate::db::{Database, test_database_url};
    use crate::user_auth::models::NewUser;
    use crate::user_auth::{PgUserRepository, UserRepository};
    use crate::auth::Role;

    async fn setup() -> (Database, i64, i64) {
        let db = Database::connect(&test_database_url())
            .await
            .expect("Failed to connect");
        db.init_schema().await.expect("schema");

        let users = PgUserRepository::new(db.pool().clone());
        let user_id = users
            .insert(NewUser {
                name: "buyer".to_string(),
                email: format!("buyer-{}@example.com", chrono::Utc::now().timestamp_micros()),
                password_hash: "$argon2id$stub".to_string(),
                role: Role::Customer,
            })
            .await
            .expect("user");

        let products = PgProductRepository::new(db.pool().clone());
        let product_id = products
            .insert(&ProductRequest {
                name: "tx-test".to_string(),
                category: "Seeds".to_string(),
                description: String::new(),
                price: Decimal::TEN,
                stock: 5,
                image_url: String::new(),
            })
            .await
            .expect("product");

        (db, user_id, product_id)
    }

    fn line(product_id: i64) -> OrderItemRequest {
        OrderItemRequest {
            product_id,
            quantity: 1,
            price: Decimal::ONE,
        }
    }

    #[test]
    fn test_lock_order_is_independent_of_request_order() {
        let forward = [line(1), line(2), line(3)];
        let reverse = [line(3), line(1), line(2)];

        let ids = |items: &[OrderItemRequest]| -> Vec<i64> {
            in_lock_order(items).iter().map(|i| i.product_id).collect()
        };
        assert_eq!(ids(&forward[..]), vec![1, 2, 3]);
        assert_eq!(ids(&reverse[..]), vec![1, 2, 3]);
    }

    async fn stock_of(db: &Database, product_id: i64) -> i32 {
        sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    async fn orders_of(db: &Database, user_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL database"]
    async fn test_pg_place_order_decrements_stock() {
        let (db, user_id, product_id) = setup().await;
        let repo = PgOrderRepository::new(db.pool().clone());

        let items = [OrderItemRequest {
            product_id,
            quantity: 2,
            price: Decimal::TEN,
        }];
        let order_id = repo
            .place_order(user_id, &items, Decimal::from(20))
            .await
            .unwrap();

        assert_eq!(stock_of(&db, product_id).await, 3);
        let item_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
                .bind(order_id)
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(item_count, 1);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL database"]
    async fn test_pg_place_order_rolls_back_on_unknown_product() {
        let (db, user_id, product_id) = setup().await;
        let repo = PgOrderRepository::new(db.pool().clone());

        let items = [
            OrderItemRequest {
                product_id,
                quantity: 2,
                price: Decimal::TEN,
            },
            OrderItemRequest {
                product_id: i64::MAX,
                quantity: 1,
                price: Decimal::TEN,
            },
        ];
        let result = repo.place_order(user_id, &items, Decimal::from(30)).await;

        assert!(matches!(result, Err(OrderError::ProductNotFound(id)) if id == i64::MAX));
        assert_eq!(stock_of(&db, product_id).await, 5, "first decrement rolled back");
        assert_eq!(orders_of(&db, user_id).await, 0);
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL database"]
    async fn test_pg_place_order_rejects_oversell() {
        let (db, user_id, product_id) = setup().await;
        let repo = PgOrderRepository::new(db.pool().clone());

        let items = [OrderItemRequest {
            product_id,
            quantity: 6,
            price: Decimal::TEN,
        }];
        let result = repo.place_order(user_id, &items, Decimal::from(60)).await;

        assert!(matches!(
            result,
            Err(OrderError::InsufficientStock {
                available: 5,
                requested: 6,
                ..
            })
        ));
        assert_eq!(stock_of(&db, product_id).await, 5);
        assert_eq!(orders_of(&db, user_id).await, 0);
    }
}
