//! In-process [`SummaryStore`] holding rows in a `BTreeMap`.
//!
//! Mirrors the PostgreSQL store's semantics (sequential ids, store-assigned
//! timestamps, tie-breaking on id, the table's `CHECK` constraints) without
//! a database.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use textsum_core::pagination::{ListOptions, SortDirection, SortField};
use textsum_core::stats::SummaryStats;
use textsum_core::types::DbId;
use tokio::sync::RwLock;

use super::summary_store::{not_found, SummaryStore};
use crate::error::StoreError;
use crate::models::summary::{NewSummary, Summary, SummaryFilter, SummaryOwner, SummaryPatch};

#[derive(Debug, Default)]
struct State {
    last_id: DbId,
    rows: BTreeMap<DbId, Summary>,
}

/// Summary store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemorySummaryStore {
    state: RwLock<State>,
}

impl MemorySummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows across all users.
    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SummaryStore for MemorySummaryStore {
    async fn create(&self, input: &NewSummary) -> Result<Summary, StoreError> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        let summary = Summary {
            id: state.last_id + 1,
            user_id: input.user_id,
            title: input.title.clone(),
            original_text: input.original_text.clone(),
            summary_text: input.summary_text.clone(),
            options: input.options,
            word_count: input.word_count,
            original_word_count: input.original_word_count,
            compression_ratio: input.compression_ratio,
            confidence: input.confidence,
            keywords: input.keywords.clone(),
            processing_time: input.processing_time,
            created_at: now,
            updated_at: now,
        };
        check_constraints(&summary)?;

        state.last_id = summary.id;
        state.rows.insert(summary.id, summary.clone());
        Ok(summary)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Summary>, StoreError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_owner(&self, id: DbId) -> Result<Option<SummaryOwner>, StoreError> {
        Ok(self.state.read().await.rows.get(&id).map(|s| SummaryOwner {
            id: s.id,
            user_id: s.user_id,
        }))
    }

    async fn list(
        &self,
        filter: &SummaryFilter,
        options: &ListOptions,
    ) -> Result<Vec<Summary>, StoreError> {
        let state = self.state.read().await;
        let needle = filter.title_contains.as_deref().map(str::to_lowercase);

        let mut matching: Vec<&Summary> = state
            .rows
            .values()
            .filter(|s| filter.user_id.map_or(true, |uid| s.user_id == uid))
            .filter(|s| {
                needle
                    .as_deref()
                    .map_or(true, |n| s.title.to_lowercase().contains(n))
            })
            .collect();

        matching.sort_by(|a, b| {
            let ord = compare_by(a, b, options.sort_by).then(a.id.cmp(&b.id));
            match options.sort_direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let offset = usize::try_from(options.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(options.limit.max(1)).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, id: DbId, patch: &SummaryPatch) -> Result<Summary, StoreError> {
        let mut state = self.state.write().await;
        let stored = state.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
        let mut row = stored.clone();

        if let Some(title) = &patch.title {
            row.title.clone_from(title);
        }
        if let Some(text) = &patch.original_text {
            row.original_text.clone_from(text);
        }
        if let Some(text) = &patch.summary_text {
            row.summary_text.clone_from(text);
        }
        if let Some(options) = patch.options {
            row.options = options;
        }
        if let Some(n) = patch.word_count {
            row.word_count = n;
        }
        if let Some(n) = patch.original_word_count {
            row.original_word_count = n;
        }
        if let Some(r) = patch.compression_ratio {
            row.compression_ratio = r;
        }
        if let Some(c) = patch.confidence {
            row.confidence = c;
        }
        if let Some(k) = &patch.keywords {
            row.keywords.clone_from(k);
        }
        if let Some(ms) = patch.processing_time {
            row.processing_time = ms;
        }
        row.updated_at = Utc::now();
        check_constraints(&row)?;

        *stored = row.clone();
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> Result<Summary, StoreError> {
        self.state
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or_else(|| not_found(id))
    }

    async fn user_stats(&self, user_id: DbId) -> Result<SummaryStats, StoreError> {
        let state = self.state.read().await;
        let owned: Vec<&Summary> = state
            .rows
            .values()
            .filter(|s| s.user_id == user_id)
            .collect();

        if owned.is_empty() {
            return Ok(SummaryStats::from_aggregates(0, None, None));
        }

        let count = owned.len() as i64;
        let word_sum: i64 = owned.iter().map(|s| i64::from(s.original_word_count)).sum();
        let ratio_avg = owned.iter().map(|s| s.compression_ratio).sum::<f64>() / count as f64;

        Ok(SummaryStats::from_aggregates(
            count,
            Some(word_sum),
            Some(ratio_avg),
        ))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// The `ck_summaries_*` constraints from the schema migration.
fn check_constraints(row: &Summary) -> Result<(), StoreError> {
    if row.word_count < 1 {
        return Err(StoreError::Constraint("ck_summaries_word_count"));
    }
    if row.original_word_count < 1 {
        return Err(StoreError::Constraint("ck_summaries_original_word_count"));
    }
    if !(0.0..=1.0).contains(&row.confidence) {
        return Err(StoreError::Constraint("ck_summaries_confidence"));
    }
    if row.processing_time < 0 {
        return Err(StoreError::Constraint("ck_summaries_processing_time"));
    }
    Ok(())
}

fn compare_by(a: &Summary, b: &Summary, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::WordCount => a.word_count.cmp(&b.word_count),
        SortField::OriginalWordCount => a.original_word_count.cmp(&b.original_word_count),
        SortField::CompressionRatio => a.compression_ratio.total_cmp(&b.compression_ratio),
        SortField::Confidence => a.confidence.total_cmp(&b.confidence),
        SortField::ProcessingTime => a.processing_time.cmp(&b.processing_time),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}
