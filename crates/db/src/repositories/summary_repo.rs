//! PostgreSQL implementation of [`SummaryStore`] for the `summaries` table.

use async_trait::async_trait;
use sqlx::PgPool;
use textsum_core::pagination::ListOptions;
use textsum_core::stats::SummaryStats;
use textsum_core::types::DbId;

use super::summary_store::{not_found, SummaryStore};
use crate::error::StoreError;
use crate::models::summary::{
    encode_keywords, encode_options, NewSummary, Summary, SummaryFilter, SummaryOwner,
    SummaryPatch, SummaryRow,
};

/// Column list for `summaries` queries.
const COLUMNS: &str = "\
    id, user_id, title, original_text, summary_text, options, \
    word_count, original_word_count, compression_ratio, confidence, \
    keywords, processing_time_ms, created_at, updated_at";

/// Summary store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgSummaryStore {
    pool: PgPool,
}

impl PgSummaryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SummaryStore for PgSummaryStore {
    async fn create(&self, input: &NewSummary) -> Result<Summary, StoreError> {
        let options = encode_options(&input.options)?;
        let keywords = input
            .keywords
            .as_deref()
            .map(encode_keywords)
            .transpose()?;

        let query = format!(
            "INSERT INTO summaries \
                (user_id, title, original_text, summary_text, options, \
                 word_count, original_word_count, compression_ratio, confidence, \
                 keywords, processing_time_ms) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SummaryRow>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.original_text)
            .bind(&input.summary_text)
            .bind(&options)
            .bind(input.word_count)
            .bind(input.original_word_count)
            .bind(input.compression_ratio)
            .bind(input.confidence)
            .bind(&keywords)
            .bind(input.processing_time)
            .fetch_one(&self.pool)
            .await?;

        Summary::try_from(row)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Summary>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM summaries WHERE id = $1");
        sqlx::query_as::<_, SummaryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Summary::try_from)
            .transpose()
    }

    async fn find_owner(&self, id: DbId) -> Result<Option<SummaryOwner>, StoreError> {
        let owner = sqlx::query_as::<_, SummaryOwner>(
            "SELECT id, user_id FROM summaries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(owner)
    }

    async fn list(
        &self,
        filter: &SummaryFilter,
        options: &ListOptions,
    ) -> Result<Vec<Summary>, StoreError> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.user_id.is_some() {
            conditions.push(format!("user_id = ${param_idx}"));
            param_idx += 1;
        }
        if filter.title_contains.is_some() {
            conditions.push(format!("title ILIKE ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        // Column and direction come from closed enums, never from raw input.
        let column = options.sort_by.column();
        let direction = options.sort_direction.sql();

        let query = format!(
            "SELECT {COLUMNS} FROM summaries {where_clause} \
             ORDER BY {column} {direction}, id {direction} \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, SummaryRow>(&query);

        if let Some(uid) = filter.user_id {
            q = q.bind(uid);
        }
        if let Some(title) = &filter.title_contains {
            q = q.bind(like_pattern(title));
        }
        q = q.bind(options.limit.max(1)).bind(options.offset());

        q.fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Summary::try_from)
            .collect()
    }

    async fn update(&self, id: DbId, patch: &SummaryPatch) -> Result<Summary, StoreError> {
        let options = patch.options.as_ref().map(encode_options).transpose()?;
        let keywords = patch
            .keywords
            .as_ref()
            .and_then(Option::as_deref)
            .map(encode_keywords)
            .transpose()?;

        let query = format!(
            "UPDATE summaries SET \
                title = COALESCE($2, title), \
                original_text = COALESCE($3, original_text), \
                summary_text = COALESCE($4, summary_text), \
                options = COALESCE($5, options), \
                word_count = COALESCE($6, word_count), \
                original_word_count = COALESCE($7, original_word_count), \
                compression_ratio = COALESCE($8, compression_ratio), \
                confidence = COALESCE($9, confidence), \
                keywords = CASE WHEN $12 THEN $10 ELSE keywords END, \
                processing_time_ms = COALESCE($11, processing_time_ms), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SummaryRow>(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.original_text)
            .bind(&patch.summary_text)
            .bind(&options)
            .bind(patch.word_count)
            .bind(patch.original_word_count)
            .bind(patch.compression_ratio)
            .bind(patch.confidence)
            .bind(&keywords)
            .bind(patch.processing_time)
            .bind(patch.keywords.is_some())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        Summary::try_from(row)
    }

    async fn delete(&self, id: DbId) -> Result<Summary, StoreError> {
        let query = format!("DELETE FROM summaries WHERE id = $1 RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, SummaryRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        tracing::debug!(summary_id = id, "Summary row deleted");
        Summary::try_from(row)
    }

    async fn user_stats(&self, user_id: DbId) -> Result<SummaryStats, StoreError> {
        let (count, word_sum, ratio_avg) = sqlx::query_as::<_, (i64, Option<i64>, Option<f64>)>(
            "SELECT COUNT(*), SUM(original_word_count)::BIGINT, AVG(compression_ratio) \
             FROM summaries WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(SummaryStats::from_aggregates(count, word_sum, ratio_avg))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

/// Wrap `needle` for `ILIKE`, escaping the pattern metacharacters.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("ai"), "%ai%");
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }
}
