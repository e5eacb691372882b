use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

use super::utils::parse_plan_id;

/// DELETE /api/sparplaene/:id - 204 on success
pub async fn plan_delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_plan_id(&id)?;
    state.plans.remove(id, user.user_id).await?;
    Ok(ApiResponse::no_content())
}
