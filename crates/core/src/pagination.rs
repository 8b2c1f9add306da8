//! Page/sort parameters for history listings.
//!
//! Pages are 1-based. Sort fields form a closed set so that the SQL layer can
//! map each one to a fixed column name instead of interpolating user input.

use serde::Deserialize;

/// Default page number.
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size.
pub const DEFAULT_LIMIT: i64 = 10;
/// Largest page size the HTTP layer accepts.
pub const MAX_LIMIT: i64 = 100;

/// Sortable summary attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Title,
    WordCount,
    OriginalWordCount,
    CompressionRatio,
    Confidence,
    ProcessingTime,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column name in the `summaries` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::WordCount => "word_count",
            Self::OriginalWordCount => "original_word_count",
            Self::CompressionRatio => "compression_ratio",
            Self::Confidence => "confidence",
            Self::ProcessingTime => "processing_time_ms",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Page, page size, and ordering for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page: i64,
    pub limit: i64,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort_by: SortField::default(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl ListOptions {
    /// Build options from optional user input, applying defaults and bounds.
    pub fn from_parts(
        page: Option<i64>,
        limit: Option<i64>,
        sort_by: Option<SortField>,
        sort_direction: Option<SortDirection>,
    ) -> Self {
        Self {
            page: clamp_page(page),
            limit: clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT),
            sort_by: sort_by.unwrap_or_default(),
            sort_direction: sort_direction.unwrap_or_default(),
        }
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit.max(1))
    }
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

/// Clamp a user-provided limit to `[1, max]`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
