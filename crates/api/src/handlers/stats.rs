use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::CanGetSummaries;
use crate::state::AppState;

/// GET /api/stats
///
/// Aggregate figures over the caller's saved summaries.
pub async fn get_stats(
    CanGetSummaries(auth): CanGetSummaries,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = state.store.user_stats(auth.user_id).await?;
    Ok(Json(stats))
}
