//! Agro Shop - storefront backend
//!
//! User accounts, a product catalog and transactional order placement
//! over PostgreSQL, served by an axum gateway.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - tracing subscriber setup (rolling file + stdout)
//! - [`db`] - PostgreSQL pool and schema
//! - [`auth`] - credential hashing, identity tokens, access control
//! - [`user_auth`] - registration and login
//! - [`catalog`] - product listing and admin CRUD
//! - [`orders`] - atomic order placement and order history
//! - [`gateway`] - HTTP router, shared state, error envelope, OpenAPI

pub mod config;
pub mod logging;

// Storage
pub mod db;

// Domain
pub mod auth;
pub mod catalog;
pub mod orders;
pub mod user_auth;

// HTTP
pub mod gateway;

pub use config::AppConfig;
pub use gateway::{build_router, run_server};
