pub mod health;
pub mod history;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /summarize                                       summarize, optionally save (POST)
///
/// /history                                         list (GET), save (POST)
/// /history/{id}                                    get, update (PATCH), delete
///
/// /stats                                           per-user aggregates (GET)
/// ```
///
/// Every route requires a bearer token. Reads need the `getSummaries` right,
/// everything else `manageSummaries`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/summarize", post(handlers::summary::summarize))
        .nest("/history", history::router())
        .route("/stats", get(handlers::stats::get_stats))
}
