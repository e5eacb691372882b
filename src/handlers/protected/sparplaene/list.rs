use axum::extract::State;

use crate::database::models::SavingsPlan;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

/// GET /api/sparplaene - The caller's plans, oldest first
pub async fn plans_get(user: AuthUser, State(state): State<AppState>) -> ApiResult<Vec<SavingsPlan>> {
    let plans = state.plans.list_for_owner(user.user_id).await?;
    Ok(ApiResponse::success(plans))
}
