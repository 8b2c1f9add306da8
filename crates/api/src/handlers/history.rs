//! Handlers for the per-user summary history.
//!
//! Listing is always scoped to the caller. The single-record endpoints load
//! the row first and refuse with 403 when it belongs to someone else, so a
//! foreign id is distinguishable from a missing one (404).
//! Reads require the `getSummaries` right and writes `manageSummaries`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use textsum_core::error::CoreError;
use textsum_core::types::DbId;
use textsum_db::models::summary::SummaryFilter;
use textsum_db::repositories::summary_store::SUMMARY_ENTITY;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, ValidatedJson, ValidatedQuery};
use crate::mapping::{
    new_summary_from_save, update_patch, HistoryItem, SaveHistoryRequest, SummaryDetail,
    UpdateHistoryRequest,
};
use crate::middleware::rbac::{CanGetSummaries, CanManageSummaries};
use crate::query::HistoryQuery;
use crate::state::AppState;

/// GET /api/history
///
/// One page of the caller's summaries. Supports `page`, `limit`, `sortBy`,
/// `sortType` and a `title` substring filter.
pub async fn list_history(
    CanGetSummaries(auth): CanGetSummaries,
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<HistoryQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = SummaryFilter {
        title_contains: params.title_filter(),
        ..SummaryFilter::for_user(auth.user_id)
    };
    let summaries = state.store.list(&filter, &params.list_options()).await?;

    let items: Vec<HistoryItem> = summaries.iter().map(HistoryItem::from).collect();
    Ok(Json(items))
}

/// POST /api/history
///
/// Save a client-produced summary. Returns 201 with the stored item.
pub async fn save_history(
    CanManageSummaries(auth): CanManageSummaries,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SaveHistoryRequest>,
) -> AppResult<impl IntoResponse> {
    let new = new_summary_from_save(auth.user_id, input)?;
    let saved = state.store.create(&new).await?;

    tracing::info!(summary_id = saved.id, user_id = auth.user_id, "Summary saved");

    Ok((StatusCode::CREATED, Json(HistoryItem::from(&saved))))
}

/// GET /api/history/{id}
pub async fn get_history(
    CanGetSummaries(auth): CanGetSummaries,
    State(state): State<AppState>,
    IdPath(summary_id): IdPath,
) -> AppResult<impl IntoResponse> {
    let summary = state
        .store
        .find_by_id(summary_id)
        .await?
        .ok_or_else(|| not_found(summary_id))?;
    ensure_owner(summary.user_id, auth.user_id, "view")?;

    Ok(Json(SummaryDetail::from(summary)))
}

/// PATCH /api/history/{id}
///
/// Update title, texts or options. Word counts and the compression ratio
/// follow any text change.
pub async fn update_history(
    CanManageSummaries(auth): CanManageSummaries,
    State(state): State<AppState>,
    IdPath(summary_id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateHistoryRequest>,
) -> AppResult<impl IntoResponse> {
    let existing = state
        .store
        .find_by_id(summary_id)
        .await?
        .ok_or_else(|| not_found(summary_id))?;
    ensure_owner(existing.user_id, auth.user_id, "update")?;

    let patch = update_patch(input, &existing)?;
    let updated = state.store.update(summary_id, &patch).await?;

    tracing::info!(summary_id, user_id = auth.user_id, "Summary updated");

    Ok(Json(SummaryDetail::from(updated)))
}

/// DELETE /api/history/{id}
pub async fn delete_history(
    CanManageSummaries(auth): CanManageSummaries,
    State(state): State<AppState>,
    IdPath(summary_id): IdPath,
) -> AppResult<StatusCode> {
    let owner = state
        .store
        .find_owner(summary_id)
        .await?
        .ok_or_else(|| not_found(summary_id))?;
    ensure_owner(owner.user_id, auth.user_id, "delete")?;

    state.store.delete(summary_id).await?;

    tracing::info!(summary_id, user_id = auth.user_id, "Summary deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: SUMMARY_ENTITY,
        id,
    })
}

fn ensure_owner(owner_id: DbId, caller_id: DbId, action: &str) -> Result<(), AppError> {
    if owner_id == caller_id {
        return Ok(());
    }
    tracing::warn!(owner_id, caller_id, action, "Cross-user summary access refused");
    Err(AppError::Core(CoreError::Forbidden(format!(
        "Cannot {action} summary that belongs to another user"
    ))))
}
