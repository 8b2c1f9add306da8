//! Mock text summarization (truncation-based).
//!
//! The summary is the leading slice of the input's whitespace-delimited
//! tokens, sized by [`SummaryLength::fraction`] with a floor of
//! [`MIN_SUMMARY_WORDS`]. Keywords and confidence are placeholders.
//!
//! The two nondeterministic inputs (wall-clock timing and the confidence
//! score) come from the injected [`Clock`] and [`ConfidenceSource`] so that
//! tests can pin them.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::error::CoreError;
use crate::options::{SummaryLength, SummaryOptions};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Inputs with fewer tokens than this are rejected.
pub const MIN_INPUT_WORDS: usize = 10;
/// Lower bound on the number of tokens kept in a summary.
pub const MIN_SUMMARY_WORDS: usize = 10;
/// Suffix attached to the last kept token.
pub const ELLIPSIS: &str = "...";
/// Keywords returned when keyword extraction is requested.
pub const PLACEHOLDER_KEYWORDS: [&str; 3] = ["keyword1", "keyword2", "keyword3"];
/// Range of the mock confidence score.
pub const CONFIDENCE_RANGE: std::ops::RangeInclusive<f64> = 0.7..=1.0;

// ---------------------------------------------------------------------------
// Word counting
// ---------------------------------------------------------------------------

/// Number of whitespace-delimited tokens in `text`.
///
/// Leading, trailing, and repeated whitespace never produce empty tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of tokens the summary keeps for an input of `original_words`.
pub fn target_word_count(original_words: usize, length: SummaryLength) -> usize {
    let scaled = (original_words as f64 * length.fraction()).floor() as usize;
    scaled.max(MIN_SUMMARY_WORDS)
}

/// `original_words / summary_words`, rejecting a zero denominator.
pub fn compression_ratio(original_words: i32, summary_words: i32) -> Result<f64, CoreError> {
    if summary_words < 1 {
        return Err(CoreError::Validation(
            "wordCount must be at least 1".to_string(),
        ));
    }
    Ok(f64::from(original_words) / f64::from(summary_words))
}

/// Convert a token count into the `INTEGER` column type.
pub fn count_to_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Monotonic time source used to measure processing time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that advances by a fixed step on every reading.
///
/// Two consecutive readings are exactly `step` apart, so a summarization
/// measured with it reports `step` as its processing time.
#[derive(Debug)]
pub struct SteppingClock {
    origin: Instant,
    step: Duration,
    ticks: AtomicU32,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            step,
            ticks: AtomicU32::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> Instant {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        self.origin + self.step * tick
    }
}

// ---------------------------------------------------------------------------
// Confidence source
// ---------------------------------------------------------------------------

/// Source of the mock confidence score.
pub trait ConfidenceSource: Send + Sync {
    /// A score in `[0, 1]`.
    fn sample(&self) -> f64;
}

/// Uniform draw from [`CONFIDENCE_RANGE`] using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomConfidence;

impl ConfidenceSource for RandomConfidence {
    fn sample(&self) -> f64 {
        rand::rng().random_range(CONFIDENCE_RANGE)
    }
}

/// Always returns the same score.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfidence(pub f64);

impl ConfidenceSource for FixedConfidence {
    fn sample(&self) -> f64 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Derived figures reported alongside a summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMetadata {
    pub original_word_count: i32,
    pub compression_ratio: f64,
    pub confidence: f64,
}

/// Output of [`Summarizer::summarize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResult {
    pub summary: String,
    pub word_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Milliseconds spent inside [`Summarizer::summarize`].
    pub processing_time: i32,
    pub metadata: SummaryMetadata,
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

/// Stateless summarizer with injectable time and confidence sources.
///
/// Cheap to clone; both sources sit behind `Arc`.
#[derive(Clone)]
pub struct Summarizer {
    clock: Arc<dyn Clock>,
    confidence: Arc<dyn ConfidenceSource>,
}

impl Summarizer {
    pub fn new(clock: Arc<dyn Clock>, confidence: Arc<dyn ConfidenceSource>) -> Self {
        Self { clock, confidence }
    }

    /// Summarizer backed by the monotonic clock and a random confidence.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(RandomConfidence))
    }

    /// Summarize `text` according to `options`.
    ///
    /// Fails with [`CoreError::Validation`] when `text` has fewer than
    /// [`MIN_INPUT_WORDS`] tokens.
    pub fn summarize(
        &self,
        text: &str,
        options: &SummaryOptions,
    ) -> Result<SummarizeResult, CoreError> {
        let started = self.clock.now();

        let words: Vec<&str> = text.split_whitespace().collect();
        let original_words = words.len();
        if original_words < MIN_INPUT_WORDS {
            return Err(CoreError::Validation(
                "Text too short to summarize".to_string(),
            ));
        }

        let target = target_word_count(original_words, options.length).min(original_words);
        let mut summary = words[..target].join(" ");
        summary.push_str(ELLIPSIS);

        // Counted on the produced string; the ellipsis rides on the last token.
        let word_count = count_to_i32(count_words(&summary));
        let original_word_count = count_to_i32(original_words);

        let keywords = options
            .extract_keywords
            .then(|| PLACEHOLDER_KEYWORDS.iter().map(|k| k.to_string()).collect());

        let confidence = self.confidence.sample().clamp(0.0, 1.0);
        let compression_ratio = f64::from(original_word_count) / f64::from(word_count);

        let elapsed = self.clock.now().saturating_duration_since(started);
        let processing_time = i32::try_from(elapsed.as_millis()).unwrap_or(i32::MAX);

        Ok(SummarizeResult {
            summary,
            word_count,
            keywords,
            processing_time,
            metadata: SummaryMetadata {
                original_word_count,
                compression_ratio,
                confidence,
            },
        })
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SummaryStyle;

    fn fixed_summarizer() -> Summarizer {
        Summarizer::new(
            Arc::new(SteppingClock::new(Duration::from_millis(7))),
            Arc::new(FixedConfidence(0.9)),
        )
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn with_length(length: SummaryLength) -> SummaryOptions {
        SummaryOptions {
            length,
            ..SummaryOptions::default()
        }
    }

    // -- count_words -----------------------------------------------------------

    #[test]
    fn count_words_ignores_surrounding_whitespace() {
        assert_eq!(count_words("  one\ttwo \n three  "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    // -- target_word_count -----------------------------------------------------

    #[test]
    fn target_has_a_floor_of_ten() {
        assert_eq!(target_word_count(10, SummaryLength::Short), 10);
        assert_eq!(target_word_count(40, SummaryLength::Medium), 10);
    }

    #[test]
    fn target_scales_with_length() {
        assert_eq!(target_word_count(200, SummaryLength::Short), 20);
        assert_eq!(target_word_count(200, SummaryLength::Medium), 40);
        assert_eq!(target_word_count(200, SummaryLength::Long), 80);
    }

    #[test]
    fn target_floors_fractional_counts() {
        assert_eq!(target_word_count(109, SummaryLength::Short), 10);
        assert_eq!(target_word_count(119, SummaryLength::Medium), 23);
    }

    // -- compression_ratio -----------------------------------------------------

    #[test]
    fn compression_ratio_divides_counts() {
        assert_eq!(compression_ratio(72, 18).unwrap(), 4.0);
    }

    #[test]
    fn compression_ratio_rejects_zero_words() {
        assert!(matches!(
            compression_ratio(10, 0),
            Err(CoreError::Validation(_))
        ));
    }

    // -- summarize -------------------------------------------------------------

    #[test]
    fn rejects_fewer_than_ten_words() {
        let err = fixed_summarizer()
            .summarize("one two three four five six seven eight nine", &SummaryOptions::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref msg) if msg == "Text too short to summarize"));
    }

    #[test]
    fn rejects_whitespace_only_text() {
        let result = fixed_summarizer().summarize(" \n\t ", &SummaryOptions::default());
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn ten_words_short_keeps_every_word() {
        let result = fixed_summarizer()
            .summarize("a b c d e f g h i j", &with_length(SummaryLength::Short))
            .unwrap();

        assert_eq!(result.summary, "a b c d e f g h i j...");
        assert_eq!(result.word_count, 10);
        assert_eq!(result.metadata.original_word_count, 10);
        assert_eq!(result.metadata.compression_ratio, 1.0);
    }

    #[test]
    fn summary_is_a_prefix_of_the_input() {
        let text = words(100);
        let result = fixed_summarizer()
            .summarize(&text, &with_length(SummaryLength::Medium))
            .unwrap();

        assert_eq!(result.word_count, 20);
        let body = result.summary.strip_suffix(ELLIPSIS).unwrap();
        assert!(text.starts_with(body));
    }

    #[test]
    fn summary_never_exceeds_original() {
        for n in [10, 11, 25, 99, 250] {
            for length in [SummaryLength::Short, SummaryLength::Medium, SummaryLength::Long] {
                let result = fixed_summarizer()
                    .summarize(&words(n), &with_length(length))
                    .unwrap();
                assert!(result.word_count <= result.metadata.original_word_count);
                assert_eq!(
                    result.metadata.compression_ratio,
                    f64::from(result.metadata.original_word_count) / f64::from(result.word_count)
                );
            }
        }
    }

    #[test]
    fn short_is_shorter_than_long() {
        let text = words(300);
        let short = fixed_summarizer()
            .summarize(&text, &with_length(SummaryLength::Short))
            .unwrap();
        let long = fixed_summarizer()
            .summarize(&text, &with_length(SummaryLength::Long))
            .unwrap();
        assert!(short.word_count < long.word_count);
    }

    #[test]
    fn keywords_only_when_requested() {
        let summarizer = fixed_summarizer();
        let text = words(30);

        let without = summarizer.summarize(&text, &SummaryOptions::default()).unwrap();
        assert!(without.keywords.is_none());

        let opts = SummaryOptions {
            extract_keywords: true,
            ..SummaryOptions::default()
        };
        let with = summarizer.summarize(&text, &opts).unwrap();
        assert_eq!(
            with.keywords.as_deref(),
            Some(&["keyword1".to_string(), "keyword2".to_string(), "keyword3".to_string()][..])
        );
    }

    #[test]
    fn style_does_not_change_output() {
        let text = words(50);
        let paragraph = fixed_summarizer()
            .summarize(&text, &SummaryOptions::default())
            .unwrap();
        let outline = fixed_summarizer()
            .summarize(
                &text,
                &SummaryOptions {
                    style: SummaryStyle::Outline,
                    ..SummaryOptions::default()
                },
            )
            .unwrap();
        assert_eq!(paragraph.summary, outline.summary);
    }

    #[test]
    fn injected_sources_are_used() {
        let result = fixed_summarizer()
            .summarize(&words(20), &SummaryOptions::default())
            .unwrap();
        assert_eq!(result.metadata.confidence, 0.9);
        assert_eq!(result.processing_time, 7);
    }

    #[test]
    fn random_confidence_stays_in_range() {
        let source = RandomConfidence;
        for _ in 0..1000 {
            let c = source.sample();
            assert!(CONFIDENCE_RANGE.contains(&c), "confidence {c} out of range");
        }
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        let summarizer = Summarizer::new(Arc::new(SystemClock), Arc::new(FixedConfidence(1.5)));
        let result = summarizer
            .summarize(&words(12), &SummaryOptions::default())
            .unwrap();
        assert_eq!(result.metadata.confidence, 1.0);
    }

    #[test]
    fn keywords_are_omitted_from_json_when_absent() {
        let result = fixed_summarizer()
            .summarize(&words(12), &SummaryOptions::default())
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("keywords").is_none());
        assert_eq!(json["wordCount"], 10);
        assert_eq!(json["metadata"]["originalWordCount"], 12);
    }
}
