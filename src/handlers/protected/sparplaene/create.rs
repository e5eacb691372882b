use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::database::models::SavingsPlan;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::PlanInput;

/// POST /api/sparplaene - Create a plan owned by the caller
///
/// Owner, id and timestamps in the body are ignored.
pub async fn plan_post(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<PlanInput>, JsonRejection>,
) -> ApiResult<SavingsPlan> {
    let Json(input) = payload?;
    let plan = state.plans.create(input, user.user_id).await?;
    Ok(ApiResponse::created(plan))
}
