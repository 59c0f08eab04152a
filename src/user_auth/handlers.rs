use axum::extract::State;
use std::sync::Arc;

use super::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResult, ValidatedJson, created, ok};

/// Register a new user
///
/// POST /api/register
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Missing fields or email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    let user_id = state.user_auth.register(req).await.inspect_err(|e| {
        tracing::warn!("Registration rejected: {}", e);
    })?;

    created(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    })
}

/// Login user
///
/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let resp = state.user_auth.login(req).await?;
    tracing::info!(user_id = resp.user.id, role = %resp.user.role, "User logged in");
    ok(resp)
}
