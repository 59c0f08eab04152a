//! User registration and login

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use models::{LoginRequest, LoginResponse, RegisterRequest, UserInfo, UserRecord};
pub use repository::{PgUserRepository, UserRepository};
pub use service::{UserAuthError, UserAuthService};
