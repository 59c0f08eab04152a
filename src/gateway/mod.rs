pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;


use anyhow::Context;
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{jwt_auth_middleware, require_admin};
use crate::catalog::handlers as catalog;
use crate::config::AppConfig;
use crate::orders::handlers as orders;
use crate::user_auth::handlers as user_auth;
use state::AppState;

/// Build the full HTTP surface over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    // ==========================================================================
    // Public Routes (no auth required)
    // ==========================================================================
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/register", post(user_auth::register))
        .route("/login", post(user_auth::login))
        .route("/products", get(catalog::list_products));

    // ==========================================================================
    // Admin Routes - token, then role. Layers run outermost-last-added.
    // ==========================================================================
    let admin_routes = Router::new()
        .route("/products", post(catalog::create_product))
        .route(
            "/products/{id}",
            put(catalog::update_product).delete(catalog::delete_product),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // ==========================================================================
    // User Routes - any authenticated role
    // ==========================================================================
    let user_routes = Router::new()
        .route("/orders", get(orders::list_orders).post(orders::place_order))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .nest(
            "/api",
            public_routes.merge(admin_routes).merge(user_routes),
        )
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start HTTP Gateway server
pub async fn run_server(config: &AppConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = TcpListener::bind(&addr).await.with_context(|| {
        format!(
            "Failed to bind to {addr}; port {} may already be in use",
            config.gateway.port
        )
    })?;

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API Docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
