//! Parser for the model's `Label: count` / `Summary:` reply template.
//!
//! Each field is located independently, so the lines may come in any order
//! and surrounding chatter is ignored. Markdown bold around a label
//! (`**Positive:** 4`) is tolerated. If any field is missing the reply is
//! reported as [`ParsedReply::Unstructured`] and callers fall back to zero
//! counts with the raw text as the summary.

use std::sync::LazyLock;

use brandwhisper_core::SentimentTally;
use regex::Regex;
use thiserror::Error;

static POSITIVE: LazyLock<Regex> = LazyLock::new(|| count_regex("Positive"));
static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| count_regex("Negative"));
static NEUTRAL: LazyLock<Regex> = LazyLock::new(|| count_regex("Neutral"));
static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Summary\*{0,2}:\*{0,2}\s*(.*)").expect("valid summary regex")
});

fn count_regex(label: &str) -> Regex {
    Regex::new(&format!(r"{label}\*{{0,2}}:\*{{0,2}}\s*(\d+)")).expect("valid count regex")
}

/// Why a reply could not be read as a tally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReply {
    #[error("missing `{0}:` field")]
    MissingField(&'static str),

    #[error("`{field}` count {value} is out of range")]
    InvalidCount { field: &'static str, value: String },
}

/// Outcome of reading a classification reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    Structured(SentimentTally),
    Unstructured { raw: String, reason: MalformedReply },
}

impl ParsedReply {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match parse_tally(raw) {
            Ok(tally) => ParsedReply::Structured(tally),
            Err(reason) => ParsedReply::Unstructured {
                raw: raw.to_string(),
                reason,
            },
        }
    }

    /// The parsed tally, or zero counts with the raw reply as summary.
    #[must_use]
    pub fn into_tally(self) -> SentimentTally {
        match self {
            ParsedReply::Structured(tally) => tally,
            ParsedReply::Unstructured { raw, .. } => SentimentTally::unparsed(raw),
        }
    }
}

fn parse_tally(raw: &str) -> Result<SentimentTally, MalformedReply> {
    let positive = count(&POSITIVE, raw, "Positive")?;
    let negative = count(&NEGATIVE, raw, "Negative")?;
    let neutral = count(&NEUTRAL, raw, "Neutral")?;
    let summary = SUMMARY
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .ok_or(MalformedReply::MissingField("Summary"))?
        .as_str()
        .trim()
        .to_string();

    Ok(SentimentTally {
        positive,
        negative,
        neutral,
        summary,
    })
}

fn count(re: &Regex, raw: &str, field: &'static str) -> Result<u32, MalformedReply> {
    let value = re
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .ok_or(MalformedReply::MissingField(field))?
        .as_str();
    value.parse::<u32>().map_err(|_| MalformedReply::InvalidCount {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str =
        "Positive: 5\nNegative: 2\nNeutral: 1\n\nSummary: People like the fit.\nSome complain about price.";

    #[test]
    fn parses_template_reply() {
        let tally = ParsedReply::parse(WELL_FORMED).into_tally();
        assert_eq!(tally.positive, 5);
        assert_eq!(tally.negative, 2);
        assert_eq!(tally.neutral, 1);
        assert_eq!(
            tally.summary,
            "People like the fit.\nSome complain about price."
        );
    }

    #[test]
    fn tolerates_reordered_fields_and_preamble() {
        let raw = "Here you go!\nNeutral: 3\nPositive: 1\nNegative: 0\nSummary:   mixed bag  ";
        let tally = ParsedReply::parse(raw).into_tally();
        assert_eq!((tally.positive, tally.negative, tally.neutral), (1, 0, 3));
        assert_eq!(tally.summary, "mixed bag");
    }

    #[test]
    fn tolerates_markdown_bold_labels() {
        let raw = "**Positive:** 4\n**Negative:** 1\n**Neutral:** 2\n\n**Summary:** solid";
        let tally = ParsedReply::parse(raw).into_tally();
        assert_eq!((tally.positive, tally.negative, tally.neutral), (4, 1, 2));
        assert_eq!(tally.summary, "solid");
    }

    #[test]
    fn missing_negative_line_falls_back_to_raw_text() {
        let raw = "Positive: 5\nNeutral: 1\n\nSummary: fine";
        let parsed = ParsedReply::parse(raw);
        assert!(matches!(
            parsed,
            ParsedReply::Unstructured {
                reason: MalformedReply::MissingField("Negative"),
                ..
            }
        ));
        assert_eq!(parsed.into_tally(), SentimentTally::unparsed(raw));
    }

    #[test]
    fn missing_summary_falls_back() {
        let raw = "Positive: 5\nNegative: 1\nNeutral: 1";
        assert!(matches!(
            ParsedReply::parse(raw),
            ParsedReply::Unstructured {
                reason: MalformedReply::MissingField("Summary"),
                ..
            }
        ));
    }

    #[test]
    fn overflowing_count_falls_back() {
        let raw = "Positive: 99999999999\nNegative: 1\nNeutral: 1\nSummary: x";
        let parsed = ParsedReply::parse(raw);
        assert!(matches!(
            parsed,
            ParsedReply::Unstructured {
                reason: MalformedReply::InvalidCount { field: "Positive", .. },
                ..
            }
        ));
    }

    #[test]
    fn free_text_reply_keeps_everything_as_summary() {
        let raw = "Error from Gemini: API error (status 500): internal";
        let tally = ParsedReply::parse(raw).into_tally();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.summary, raw);
    }
}
