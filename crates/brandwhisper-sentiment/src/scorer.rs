//! Deterministic sentiment percentage and grade.

use brandwhisper_core::{Grade, ScoreResult, SentimentTally};

/// Weight of a neutral post relative to a positive one.
const NEUTRAL_WEIGHT: f64 = 0.5;

/// Score a tally: `(positive + 0.5 * neutral) / total` as a percentage rounded
/// to one decimal place, plus its [`Grade`]. An empty tally scores `0.0`.
#[must_use]
pub fn score(tally: &SentimentTally) -> ScoreResult {
    let percent = sentiment_percent(tally);
    ScoreResult {
        percent,
        grade: grade_for_percent(percent),
    }
}

/// Sentiment percentage in `[0, 100]`, one decimal place. Exact ties round
/// to the even tenth, so `6.25` becomes `6.2`.
#[must_use]
pub fn sentiment_percent(tally: &SentimentTally) -> f64 {
    let total = tally.total();
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let total = total as f64;
    let raw = f64::from(tally.positive) + f64::from(tally.neutral) * NEUTRAL_WEIGHT;
    let percent = 100.0 * raw / total;
    (percent * 10.0).round_ties_even() / 10.0
}

/// Map a percentage onto a [`Grade`].
///
/// Rules are tried top to bottom and the first match wins. The `Positive`
/// (`>= 60`) and `Mixed` (`45..=60`) bands both contain 60; 60 grades as
/// `Positive` because that rule comes first.
#[must_use]
pub fn grade_for_percent(percent: f64) -> Grade {
    if percent >= 90.0 {
        Grade::Excellent
    } else if percent >= 75.0 {
        Grade::VeryPositive
    } else if percent >= 60.0 {
        Grade::Positive
    } else if (45.0..=60.0).contains(&percent) {
        Grade::Mixed
    } else if percent >= 30.0 {
        Grade::Negative
    } else if percent >= 15.0 {
        Grade::VeryNegative
    } else {
        Grade::Critical
    }
}
