//! Summarization options shared by the summarize endpoint and stored history.
//!
//! Stored rows keep these as JSON text; above the storage edge they are
//! always the typed [`SummaryOptions`].

use serde::{Deserialize, Serialize};

/// Requested summary length. Selects the truncation fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLength {
    /// Fraction of the original word count kept in the summary.
    pub fn fraction(self) -> f64 {
        match self {
            Self::Short => 0.1,
            Self::Medium => 0.2,
            Self::Long => 0.4,
        }
    }
}

/// Requested presentation style. The mock summarizer ignores it, but it is
/// persisted with the record so the UI can restore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Paragraph,
    #[serde(alias = "bullet-points")]
    Bullet,
    #[serde(alias = "key-highlights")]
    Outline,
}

/// Options accepted by the summarizer. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryOptions {
    pub length: SummaryLength,
    pub style: SummaryStyle,
    pub extract_keywords: bool,
}
