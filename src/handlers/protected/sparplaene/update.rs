use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::database::models::SavingsPlan;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;
use crate::services::PlanInput;

use super::utils::parse_plan_id;

/// PUT /api/sparplaene/:id - Replace the mutable fields of an owned plan
pub async fn plan_put(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PlanInput>, JsonRejection>,
) -> ApiResult<SavingsPlan> {
    let id = parse_plan_id(&id)?;
    let Json(input) = payload?;
    let plan = state.plans.update(id, input, user.user_id).await?;
    Ok(ApiResponse::success(plan))
}
