use std::sync::Arc;

use textsum_core::summarization::Summarizer;
use textsum_db::repositories::SummaryStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Summary history persistence. PostgreSQL in production.
    pub store: Arc<dyn SummaryStore>,
    /// Mock summarizer with its clock and confidence source.
    pub summarizer: Summarizer,
    /// Server configuration (read by the auth extractor).
    pub config: Arc<ServerConfig>,
}
