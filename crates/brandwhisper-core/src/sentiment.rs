use serde::Serialize;

/// Positive/negative/neutral counts plus the model's prose summary.
///
/// Counts come from the model and need not add up to the number of opinions
/// that were sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTally {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
    pub summary: String,
}

impl SentimentTally {
    /// Zero counts with `raw` kept verbatim as the summary.
    #[must_use]
    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self {
            positive: 0,
            negative: 0,
            neutral: 0,
            summary: raw.into(),
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.positive) + u64::from(self.negative) + u64::from(self.neutral)
    }

    /// Chart rows in display order: Positive, Negative, Neutral.
    #[must_use]
    pub fn chart_rows(&self) -> Vec<SentimentCount> {
        vec![
            SentimentCount {
                sentiment: "Positive",
                count: self.positive,
            },
            SentimentCount {
                sentiment: "Negative",
                count: self.negative,
            },
            SentimentCount {
                sentiment: "Neutral",
                count: self.neutral,
            },
        ]
    }
}

/// One bar of the sentiment breakdown chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentCount {
    pub sentiment: &'static str,
    pub count: u32,
}

/// Three-way label decided by strict majority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallSentiment {
    Positive,
    Negative,
    Neutral,
}

impl OverallSentiment {
    /// Strict-majority label. Any tie for the top count resolves to `Neutral`.
    #[must_use]
    pub fn from_tally(tally: &SentimentTally) -> Self {
        let (p, n, z) = (tally.positive, tally.negative, tally.neutral);
        if p > n.max(z) {
            OverallSentiment::Positive
        } else if n > p.max(z) {
            OverallSentiment::Negative
        } else {
            OverallSentiment::Neutral
        }
    }
}

impl std::fmt::Display for OverallSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallSentiment::Positive => write!(f, "positive"),
            OverallSentiment::Negative => write!(f, "negative"),
            OverallSentiment::Neutral => write!(f, "neutral"),
        }
    }
}

/// Discrete grade for a sentiment percentage, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Excellent,
    #[serde(rename = "Very Positive")]
    VeryPositive,
    Positive,
    Mixed,
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
    Critical,
}

impl Grade {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::VeryPositive => "Very Positive",
            Grade::Positive => "Positive",
            Grade::Mixed => "Mixed",
            Grade::Negative => "Negative",
            Grade::VeryNegative => "Very Negative",
            Grade::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sentiment percentage in `[0, 100]` (one decimal place) and its grade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    pub percent: f64,
    pub grade: Grade,
}

/// Free-text product quality narrative, or an error message if the model
/// call failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QualityReport(pub String);

impl QualityReport {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QualityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
