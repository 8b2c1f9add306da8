//! Per-user summary statistics.

use serde::{Deserialize, Serialize};

/// Aggregate figures over one user's summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_summaries: i64,
    pub total_words_summarized: i64,
    pub average_compression_ratio: f64,
}

impl SummaryStats {
    /// Build stats from raw aggregates, treating absent sums/averages as zero.
    pub fn from_aggregates(count: i64, word_sum: Option<i64>, ratio_avg: Option<f64>) -> Self {
        Self {
            total_summaries: count,
            total_words_summarized: word_sum.unwrap_or(0),
            average_compression_ratio: round_ratio(ratio_avg.unwrap_or(0.0)),
        }
    }
}

/// Round to two decimal places. Non-finite input becomes `0.0`.
pub fn round_ratio(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}
