//! Request and response shapes for the `/api` surface, and the conversions
//! between them and the store's types.
//!
//! Everything here is camelCase on the wire. Ids are rendered as strings and
//! timestamps as RFC 3339 with millisecond precision.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use textsum_core::error::CoreError;
use textsum_core::options::SummaryOptions;
use textsum_core::summarization::{compression_ratio, count_to_i32, count_words, SummarizeResult};
use textsum_core::types::{DbId, Timestamp};
use textsum_db::models::summary::{NewSummary, Summary, SummaryPatch};
use validator::Validate;

/// Confidence recorded for summaries saved from the client.
pub const SAVED_CONFIDENCE: f64 = 0.85;
/// Processing time recorded for summaries saved from the client, in milliseconds.
pub const SAVED_PROCESSING_TIME_MS: i32 = 1000;
/// Keywords recorded for client-saved summaries that asked for extraction.
pub const SAVED_KEYWORDS: [&str; 2] = ["keyword1", "keyword2"];

/// Words taken from the input when a persisted summary has no title.
const DEFAULT_TITLE_WORDS: usize = 8;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/summarize`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    #[validate(length(min = 10, message = "text must be at least 10 characters"))]
    pub text: String,
    #[serde(default)]
    pub options: SummaryOptions,
    /// Persist the result to the caller's history.
    #[serde(default)]
    pub save: bool,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
}

/// Body of `POST /api/history`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveHistoryRequest {
    #[validate(length(min = 1, message = "originalText must not be empty"))]
    pub original_text: String,
    #[validate(length(min = 1, message = "summary must not be empty"))]
    pub summary: String,
    pub options: SummaryOptions,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(range(min = 1, message = "wordCount must be at least 1"))]
    pub word_count: i32,
}

/// Body of `PATCH /api/history/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistoryRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "originalText must not be empty"))]
    pub original_text: Option<String>,
    #[validate(length(min = 1, message = "summary must not be empty"))]
    pub summary: Option<String>,
    pub options: Option<SummaryOptions>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Response of `POST /api/summarize`. `id` is present only when saved.
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    #[serde(flatten)]
    pub result: SummarizeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// One entry of the history list, and the body returned after saving.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub original_text: String,
    pub summary: String,
    pub options: SummaryOptions,
    pub created_at: String,
    pub word_count: i32,
    pub title: String,
}

impl From<&Summary> for HistoryItem {
    fn from(s: &Summary) -> Self {
        Self {
            id: s.id.to_string(),
            original_text: s.original_text.clone(),
            summary: s.summary_text.clone(),
            options: s.options,
            created_at: format_timestamp(&s.created_at),
            word_count: s.word_count,
            title: s.title.clone(),
        }
    }
}

/// Full record returned by the single-summary endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDetail {
    pub id: String,
    pub title: String,
    pub original_text: String,
    pub summary: String,
    pub options: SummaryOptions,
    pub word_count: i32,
    pub original_word_count: i32,
    pub compression_ratio: f64,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    pub processing_time: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Summary> for SummaryDetail {
    fn from(s: Summary) -> Self {
        Self {
            id: s.id.to_string(),
            created_at: format_timestamp(&s.created_at),
            updated_at: format_timestamp(&s.updated_at),
            title: s.title,
            original_text: s.original_text,
            summary: s.summary_text,
            options: s.options,
            word_count: s.word_count,
            original_word_count: s.original_word_count,
            compression_ratio: s.compression_ratio,
            confidence: s.confidence,
            keywords: s.keywords,
            processing_time: s.processing_time,
        }
    }
}

pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ---------------------------------------------------------------------------
// Conversions into store input
// ---------------------------------------------------------------------------

/// Build the record for a client-supplied summary.
///
/// The derived figures are recomputed from the submitted text; confidence,
/// processing time and keywords take fixed values.
pub fn new_summary_from_save(
    user_id: DbId,
    req: SaveHistoryRequest,
) -> Result<NewSummary, CoreError> {
    let original_word_count = count_to_i32(count_words(&req.original_text));
    if original_word_count < 1 {
        return Err(CoreError::Validation(
            "originalText must contain at least one word".to_string(),
        ));
    }
    let ratio = compression_ratio(original_word_count, req.word_count)?;

    let keywords = req.options.extract_keywords.then(saved_keywords);

    Ok(NewSummary {
        user_id,
        title: req.title,
        original_text: req.original_text,
        summary_text: req.summary,
        options: req.options,
        word_count: req.word_count,
        original_word_count,
        compression_ratio: ratio,
        confidence: SAVED_CONFIDENCE,
        keywords,
        processing_time: SAVED_PROCESSING_TIME_MS,
    })
}

/// Build the record for a result produced by the summarizer itself.
pub fn new_summary_from_result(
    user_id: DbId,
    title: Option<String>,
    original_text: String,
    options: SummaryOptions,
    result: &SummarizeResult,
) -> NewSummary {
    NewSummary {
        user_id,
        title: title.unwrap_or_else(|| default_title(&original_text)),
        original_text,
        summary_text: result.summary.clone(),
        options,
        word_count: result.word_count,
        original_word_count: result.metadata.original_word_count,
        compression_ratio: result.metadata.compression_ratio,
        confidence: result.metadata.confidence,
        keywords: result.keywords.clone(),
        processing_time: result.processing_time,
    }
}

fn saved_keywords() -> Vec<String> {
    SAVED_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// Turn an update request into a patch against `existing`.
///
/// Changing either text recounts its words and recomputes the compression
/// ratio from the resulting pair. New options keep keywords in step with
/// `extractKeywords`: turning it on fills the fixed keywords when none are
/// stored, turning it off clears them.
pub fn update_patch(
    req: UpdateHistoryRequest,
    existing: &Summary,
) -> Result<SummaryPatch, CoreError> {
    let mut patch = SummaryPatch {
        title: req.title,
        options: req.options,
        ..SummaryPatch::default()
    };

    if let Some(text) = req.original_text {
        let n = count_to_i32(count_words(&text));
        if n < 1 {
            return Err(CoreError::Validation(
                "originalText must contain at least one word".to_string(),
            ));
        }
        patch.original_word_count = Some(n);
        patch.original_text = Some(text);
    }
    if let Some(text) = req.summary {
        let n = count_to_i32(count_words(&text));
        if n < 1 {
            return Err(CoreError::Validation(
                "summary must contain at least one word".to_string(),
            ));
        }
        patch.word_count = Some(n);
        patch.summary_text = Some(text);
    }

    if patch.original_word_count.is_some() || patch.word_count.is_some() {
        let original = patch
            .original_word_count
            .unwrap_or(existing.original_word_count);
        let summary = patch.word_count.unwrap_or(existing.word_count);
        patch.compression_ratio = Some(compression_ratio(original, summary)?);
    }

    if let Some(options) = &patch.options {
        match (options.extract_keywords, existing.keywords.is_some()) {
            (true, false) => patch.keywords = Some(Some(saved_keywords())),
            (false, true) => patch.keywords = Some(None),
            _ => {}
        }
    }

    if patch.is_empty() {
        return Err(CoreError::Validation(
            "At least one field must be provided".to_string(),
        ));
    }
    Ok(patch)
}

/// First few words of `text`, with an ellipsis when cut short.
pub fn default_title(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= DEFAULT_TITLE_WORDS {
        return words.join(" ");
    }
    let mut title = words[..DEFAULT_TITLE_WORDS].join(" ");
    title.push_str("...");
    title
}
