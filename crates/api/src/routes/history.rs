//! Route definitions for summary history, mounted at `/history`.

use axum::routing::get;
use axum::Router;

use crate::handlers::history;
use crate::state::AppState;

/// ```text
/// GET    /                  -> list_history
/// POST   /                  -> save_history
/// GET    /{id}              -> get_history
/// PATCH  /{id}              -> update_history
/// DELETE /{id}              -> delete_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(history::list_history).post(history::save_history))
        .route(
            "/{id}",
            get(history::get_history)
                .patch(history::update_history)
                .delete(history::delete_history),
        )
}
