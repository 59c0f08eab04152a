//! Authentication and access control
//!
//! - [`password`]: credential hasher (Argon2id)
//! - [`token`]: signed, time-limited identity tokens (HS256)
//! - [`middleware`]: `authenticate` / `authorize` and their axum layers

pub mod middleware;
pub mod models;
pub mod password;
pub mod token;

pub use middleware::{
    AccessError, authenticate, authorize, extract_token, jwt_auth_middleware, require_admin,
};
pub use models::{Claims, Identity, Role};
pub use password::CredentialHasher;
pub use token::{TokenError, TokenService};
