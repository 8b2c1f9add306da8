//! Summary entity, its storage row, and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use textsum_core::options::SummaryOptions;
use textsum_core::types::{DbId, Timestamp};

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `summaries` table exactly as stored.
///
/// `options` and `keywords` are JSON text. Convert to [`Summary`] with
/// `Summary::try_from` before handing the row to anything outside this crate.
#[derive(Debug, Clone, FromRow)]
pub struct SummaryRow {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub original_text: String,
    pub summary_text: String,
    pub options: String,
    pub word_count: i32,
    pub original_word_count: i32,
    pub compression_ratio: f64,
    pub confidence: f64,
    pub keywords: Option<String>,
    pub processing_time_ms: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One persisted summarization result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub original_text: String,
    pub summary_text: String,
    pub options: SummaryOptions,
    pub word_count: i32,
    pub original_word_count: i32,
    pub compression_ratio: f64,
    pub confidence: f64,
    pub keywords: Option<Vec<String>>,
    /// Milliseconds.
    pub processing_time: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<SummaryRow> for Summary {
    type Error = StoreError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        let options = decode_options(&row.options)?;
        let keywords = row.keywords.as_deref().map(decode_keywords).transpose()?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            original_text: row.original_text,
            summary_text: row.summary_text,
            options,
            word_count: row.word_count,
            original_word_count: row.original_word_count,
            compression_ratio: row.compression_ratio,
            confidence: row.confidence,
            keywords,
            processing_time: row.processing_time_ms,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// The `(id, user_id)` projection used for ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct SummaryOwner {
    pub id: DbId,
    pub user_id: DbId,
}

impl SummaryOwner {
    pub fn is_owned_by(&self, user_id: DbId) -> bool {
        self.user_id == user_id
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Input for [`crate::repositories::SummaryStore::create`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewSummary {
    pub user_id: DbId,
    pub title: String,
    pub original_text: String,
    pub summary_text: String,
    pub options: SummaryOptions,
    pub word_count: i32,
    pub original_word_count: i32,
    pub compression_ratio: f64,
    pub confidence: f64,
    pub keywords: Option<Vec<String>>,
    pub processing_time: i32,
}

/// Partial update. `None` leaves the column unchanged.
///
/// `keywords` is the one nullable column: `Some(None)` clears it.
/// `id` and `user_id` are immutable and have no field here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryPatch {
    pub title: Option<String>,
    pub original_text: Option<String>,
    pub summary_text: Option<String>,
    pub options: Option<SummaryOptions>,
    pub word_count: Option<i32>,
    pub original_word_count: Option<i32>,
    pub compression_ratio: Option<f64>,
    pub confidence: Option<f64>,
    pub keywords: Option<Option<Vec<String>>>,
    pub processing_time: Option<i32>,
}

impl SummaryPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Row filter for listings. All present conditions must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    pub user_id: Option<DbId>,
    /// Case-insensitive substring of the title.
    pub title_contains: Option<String>,
}

impl SummaryFilter {
    pub fn for_user(user_id: DbId) -> Self {
        Self {
            user_id: Some(user_id),
            title_contains: None,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON text columns
// ---------------------------------------------------------------------------

pub fn encode_options(options: &SummaryOptions) -> Result<String, StoreError> {
    Ok(serde_json::to_string(options)?)
}

pub fn decode_options(text: &str) -> Result<SummaryOptions, StoreError> {
    Ok(serde_json::from_str(text)?)
}

pub fn encode_keywords(keywords: &[String]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(keywords)?)
}

pub fn decode_keywords(text: &str) -> Result<Vec<String>, StoreError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use textsum_core::options::{SummaryLength, SummaryStyle};

    use super::*;

    fn row(options: &str, keywords: Option<&str>) -> SummaryRow {
        let now = Utc::now();
        SummaryRow {
            id: 1,
            user_id: 7,
            title: "AI Technology Overview".into(),
            original_text: "original".into(),
            summary_text: "summary".into(),
            options: options.into(),
            word_count: 18,
            original_word_count: 72,
            compression_ratio: 4.0,
            confidence: 0.92,
            keywords: keywords.map(str::to_string),
            processing_time_ms: 1250,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_decodes_json_columns() {
        let summary = Summary::try_from(row(
            r#"{"length":"medium","style":"paragraph","extractKeywords":true}"#,
            Some(r#"["AI","machine learning"]"#),
        ))
        .unwrap();

        assert_eq!(summary.options.length, SummaryLength::Medium);
        assert_eq!(summary.options.style, SummaryStyle::Paragraph);
        assert!(summary.options.extract_keywords);
        assert_eq!(
            summary.keywords,
            Some(vec!["AI".to_string(), "machine learning".to_string()])
        );
        assert_eq!(summary.processing_time, 1250);
    }

    #[test]
    fn null_keywords_stay_none() {
        let summary = Summary::try_from(row("{}", None)).unwrap();
        assert!(summary.keywords.is_none());
        assert_eq!(summary.options, SummaryOptions::default());
    }

    #[test]
    fn malformed_options_are_reported() {
        let err = Summary::try_from(row("not json", None)).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn options_round_trip_through_text() {
        let options = SummaryOptions {
            length: SummaryLength::Long,
            style: SummaryStyle::Outline,
            extract_keywords: true,
        };
        let text = encode_options(&options).unwrap();
        assert_eq!(decode_options(&text).unwrap(), options);
    }

    #[test]
    fn empty_patch() {
        assert!(SummaryPatch::default().is_empty());
        let patch = SummaryPatch {
            title: Some("x".into()),
            ..SummaryPatch::default()
        };
        assert!(!patch.is_empty());

        let clear_keywords = SummaryPatch {
            keywords: Some(None),
            ..SummaryPatch::default()
        };
        assert!(!clear_keywords.is_empty());
    }

    #[test]
    fn owner_check() {
        let owner = SummaryOwner { id: 3, user_id: 9 };
        assert!(owner.is_owned_by(9));
        assert!(!owner.is_owned_by(10));
    }
}
