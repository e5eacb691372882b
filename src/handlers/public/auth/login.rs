// handlers/public/auth/login.rs - POST /api/auth/login handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::AuthSession;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/login - Exchange credentials for a token
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<AuthSession> {
    let Json(request) = payload?;
    let session = state
        .accounts
        .login(request.email.as_deref(), request.password.as_deref())
        .await?;
    Ok(ApiResponse::success(session))
}
