use axum::extract::{Path, State};

use crate::database::models::SavingsPlan;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

use super::utils::parse_plan_id;

/// GET /api/sparplaene/:id - 403 for another user's plan, 404 when absent
pub async fn plan_get(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SavingsPlan> {
    let id = parse_plan_id(&id)?;
    let plan = state.plans.get_owned(id, user.user_id).await?;
    Ok(ApiResponse::success(plan))
}
