// handlers/public/auth/register.rs - POST /api/auth/register handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;
use crate::services::AuthSession;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/register - Create an account and return a token for it
///
/// 201 `{token, userId, email}`, 400 on invalid input, 409 when the
/// normalized email is already registered.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<AuthSession> {
    let Json(request) = payload?;
    let session = state
        .accounts
        .register(request.email.as_deref(), request.password.as_deref())
        .await?;
    Ok(ApiResponse::created(session))
}
