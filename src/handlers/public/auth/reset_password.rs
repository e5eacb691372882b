// handlers/public/auth/reset_password.rs - POST /api/auth/reset-password handler

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetPasswordResponse {
    pub message: &'static str,
}

/// POST /api/auth/reset-password - Replace the password of an existing account
///
/// No token is issued; the client logs in again with the new password.
pub async fn reset_password_post(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> ApiResult<ResetPasswordResponse> {
    let Json(request) = payload?;
    state
        .accounts
        .reset_password(request.email.as_deref(), request.new_password.as_deref())
        .await?;
    Ok(ApiResponse::success(ResetPasswordResponse {
        message: "Password has been reset",
    }))
}
