//! HTTP error mapping
//!
//! Every domain error converts into [`ApiError`], which renders as the
//! unified `{code, msg}` envelope. Store failures are logged here and
//! reported to clients only as a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::response::{ApiResponse, error_codes};
use crate::auth::{AccessError, Role};
use crate::catalog::CatalogError;
use crate::orders::OrderError;
use crate::user_auth::UserAuthError;

/// Handler result: status code plus a JSON body, or an [`ApiError`]
pub type ApiResult<T> = Result<(StatusCode, Json<T>), ApiError>;

/// 200 OK with body
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(data)))
}

/// 201 Created with body
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(data)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()>::error(self.code, self.msg));
        (self.status, body).into_response()
    }
}

impl From<AccessError> for ApiError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::MissingToken => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::MISSING_AUTH,
                e.to_string(),
            ),
            AccessError::ExpiredToken | AccessError::InvalidToken => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                e.to_string(),
            ),
            AccessError::Forbidden { required } => Self::new(
                StatusCode::FORBIDDEN,
                error_codes::PERMISSION_DENIED,
                match required {
                    Role::Admin => "Admin access required".to_string(),
                    Role::Customer => e.to_string(),
                },
            ),
        }
    }
}

impl From<UserAuthError> for ApiError {
    fn from(e: UserAuthError) -> Self {
        match e {
            UserAuthError::DuplicateEmail => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::DUPLICATE_EMAIL,
                "Email already registered",
            ),
            UserAuthError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                "Invalid credentials",
            ),
            other => {
                tracing::error!("User auth failure: {:?}", other);
                Self::internal("Authentication service error")
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound(_) => Self::not_found("Product not found"),
            CatalogError::InUse(_) => Self::new(
                StatusCode::CONFLICT,
                error_codes::CONFLICT,
                "Product is referenced by existing orders",
            ),
            CatalogError::Database(err) => {
                tracing::error!("Catalog store failure: {:?}", err);
                Self::internal("Database operation failed")
            }
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::InsufficientStock { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::INSUFFICIENT_STOCK,
                e.to_string(),
            ),
            OrderError::Database(err) => {
                tracing::error!("Order store failure: {:?}", err);
                Self::internal("Failed to create order")
            }
            other => Self::bad_request(other.to_string()),
        }
    }
}
