//! Access control: authenticate the bearer token, then authorize the role.
//!
//! Both checks are plain functions so they can be unit tested; the axum
//! middlewares below compose them per route registration.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use thiserror::Error;

use super::models::{Identity, Role};
use super::token::{TokenError, TokenService};
use crate::gateway::{state::AppState, types::ApiError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Token is missing")]
    MissingToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("{required} access required")]
    Forbidden { required: Role },
}

/// Strip an optional scheme prefix ("Bearer <token>") from the header value.
pub fn extract_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    let first = parts.next()?;
    match (parts.next(), parts.next()) {
        (None, _) => Some(first),
        (Some(token), None) => Some(token),
        (Some(_), Some(_)) => None,
    }
}

/// Resolve the caller's identity from the raw `Authorization` header value
pub fn authenticate(
    header_value: Option<&str>,
    tokens: &TokenService,
) -> Result<Identity, AccessError> {
    let header_value = header_value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AccessError::MissingToken)?;
    let token = extract_token(header_value).ok_or(AccessError::InvalidToken)?;

    match tokens.verify(token) {
        Ok(claims) => Ok(Identity::from(claims)),
        Err(TokenError::Expired) => Err(AccessError::ExpiredToken),
        Err(e) => {
            tracing::debug!("Token rejected: {}", e);
            Err(AccessError::InvalidToken)
        }
    }
}

pub fn authorize(identity: &Identity, required: Role) -> Result<(), AccessError> {
    if identity.role.satisfies(required) {
        Ok(())
    } else {
        Err(AccessError::Forbidden { required })
    }
}

/// Reject unauthenticated requests and inject [`Identity`] for handlers
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let identity = authenticate(header_value, &state.tokens)?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Must be layered inside [`jwt_auth_middleware`]
pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or(AccessError::MissingToken)?;

    if let Err(e) = authorize(identity, Role::Admin) {
        tracing::warn!(
            user_id = identity.user_id,
            path = %request.uri().path(),
            "Admin route denied"
        );
        return Err(e.into());
    }

    Ok(next.run(request).await)
}
