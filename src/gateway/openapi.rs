//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:5000/docs`
//! - OpenAPI JSON: `http://localhost:5000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::Role;
use crate::catalog::{Product, ProductCreated, ProductRequest};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::MessageResponse;
use crate::orders::{Order, OrderItemRequest, OrderPlaced, PlaceOrderRequest};
use crate::user_auth::models::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo,
};

/// Bearer token issued by POST /api/login
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from POST /api/login. The `Bearer` prefix is optional.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agro Shop API",
        version = "1.0.0",
        description = "Storefront backend: accounts, product catalog and transactional order placement.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:5000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::catalog::handlers::list_products,
        crate::catalog::handlers::create_product,
        crate::catalog::handlers::update_product,
        crate::catalog::handlers::delete_product,
        crate::orders::handlers::place_order,
        crate::orders::handlers::list_orders,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            Role,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            UserInfo,
            Product,
            ProductRequest,
            ProductCreated,
            OrderItemRequest,
            PlaceOrderRequest,
            Order,
            OrderPlaced,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Catalog", description = "Products (mutations require admin)"),
        (name = "Orders", description = "Order placement and history (auth required)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
