//! Handler for the mock summarization endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::mapping::{new_summary_from_result, SummarizeRequest, SummarizeResponse};
use crate::middleware::rbac::CanManageSummaries;
use crate::state::AppState;

/// POST /api/summarize
///
/// Summarize the submitted text. With `"save": true` the result is also
/// written to the caller's history and the new record's id is returned.
pub async fn summarize(
    CanManageSummaries(auth): CanManageSummaries,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SummarizeRequest>,
) -> AppResult<impl IntoResponse> {
    let result = state.summarizer.summarize(&input.text, &input.options)?;

    tracing::debug!(
        user_id = auth.user_id,
        original_word_count = result.metadata.original_word_count,
        word_count = result.word_count,
        "Text summarized",
    );

    let id = if input.save {
        let new = new_summary_from_result(
            auth.user_id,
            input.title,
            input.text,
            input.options,
            &result,
        );
        let saved = state.store.create(&new).await?;
        tracing::info!(summary_id = saved.id, user_id = auth.user_id, "Summary saved");
        Some(saved.id.to_string())
    } else {
        None
    };

    Ok(Json(SummarizeResponse { result, id }))
}
