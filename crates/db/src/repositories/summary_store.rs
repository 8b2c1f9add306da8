//! The persistence interface for summary history.

use async_trait::async_trait;
use textsum_core::pagination::ListOptions;
use textsum_core::stats::SummaryStats;
use textsum_core::types::DbId;

use crate::error::StoreError;
use crate::models::summary::{NewSummary, Summary, SummaryFilter, SummaryOwner, SummaryPatch};

/// Entity name used in [`StoreError::NotFound`].
pub const SUMMARY_ENTITY: &str = "Summary";

/// CRUD and aggregate queries over `Summary` records.
///
/// None of these operations check ownership. Callers that act on behalf of
/// a user must compare [`SummaryOwner::user_id`] first.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    /// Insert a record and return it with its generated id and timestamps.
    async fn create(&self, input: &NewSummary) -> Result<Summary, StoreError>;

    /// Fetch a record. A missing row is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Summary>, StoreError>;

    /// Fetch only the `(id, user_id)` pair of a record.
    async fn find_owner(&self, id: DbId) -> Result<Option<SummaryOwner>, StoreError>;

    /// One page of records matching `filter`, ordered per `options`.
    ///
    /// Ties on the sort column are broken by `id` in the same direction.
    async fn list(
        &self,
        filter: &SummaryFilter,
        options: &ListOptions,
    ) -> Result<Vec<Summary>, StoreError>;

    /// Apply `patch` and refresh `updated_at`.
    ///
    /// Fails with [`StoreError::NotFound`] if `id` does not exist.
    async fn update(&self, id: DbId, patch: &SummaryPatch) -> Result<Summary, StoreError>;

    /// Remove a record and return it as it was before deletion.
    ///
    /// Fails with [`StoreError::NotFound`] if `id` does not exist.
    async fn delete(&self, id: DbId) -> Result<Summary, StoreError>;

    /// Count, word total, and rounded mean compression ratio for a user.
    /// All zero when the user has no records.
    async fn user_stats(&self, user_id: DbId) -> Result<SummaryStats, StoreError>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

pub(crate) fn not_found(id: DbId) -> StoreError {
    StoreError::NotFound {
        entity: SUMMARY_ENTITY,
        id,
    }
}
