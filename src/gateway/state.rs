use std::sync::Arc;

use crate::auth::{CredentialHasher, TokenService};
use crate::catalog::{CatalogService, PgProductRepository};
use crate::config::AppConfig;
use crate::db::Database;
use crate::orders::{OrderService, PgOrderRepository};
use crate::user_auth::{PgUserRepository, UserAuthService};

/// Gateway shared state, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub user_auth: Arc<UserAuthService>,
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    /// Token verifier used by the access-control layer
    pub tokens: Arc<TokenService>,
    /// PostgreSQL pool, used by the health check (None in router tests)
    pub pg_db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(
        user_auth: Arc<UserAuthService>,
        catalog: Arc<CatalogService>,
        orders: Arc<OrderService>,
        tokens: Arc<TokenService>,
        pg_db: Option<Arc<Database>>,
    ) -> Self {
        Self {
            user_auth,
            catalog,
            orders,
            tokens,
            pg_db,
        }
    }

    /// Wire every service onto one shared pool
    pub fn from_database(db: Arc<Database>, config: &AppConfig) -> Self {
        let pool = db.pool().clone();
        let tokens = Arc::new(TokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl_hours,
        ));

        let user_auth = Arc::new(UserAuthService::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            CredentialHasher::default(),
            tokens.clone(),
        ));
        let catalog = Arc::new(CatalogService::new(
            Arc::new(PgProductRepository::new(pool.clone())),
            config.catalog.hide_out_of_stock,
        ));
        let orders = Arc::new(OrderService::new(Arc::new(PgOrderRepository::new(pool))));

        Self::new(user_auth, catalog, orders, tokens, Some(db))
    }
}
