//! Plain-text rendering of an analysis bundle.

use brandwhisper_core::Scope;
use brandwhisper_sentiment::AnalysisBundle;

/// Widest bar drawn in the sentiment breakdown.
const BAR_WIDTH: usize = 30;

/// Render `bundle` as a terminal report.
pub(crate) fn report(bundle: &AnalysisBundle) -> String {
    let mut out = format!("{}\n\n", banner(&bundle.scope, &bundle.query));

    if bundle.is_empty() {
        out.push_str("No relevant posts found.\n");
        return out;
    }

    out.push_str(&format!("{}\n\n", bundle.summary_text));
    out.push_str(&format!("## Brand Summary\n{}\n\n", bundle.brand_summary()));

    if let Some(quality) = &bundle.quality {
        out.push_str(&format!("## Product Quality\n{quality}\n\n"));
    }

    if let Some(score) = &bundle.score {
        out.push_str(&format!(
            "## Sentiment Score\n{:.1}%\nGrade: {}\n{} on \"{}\"\n\n",
            score.percent, score.grade, bundle.scope, bundle.query
        ));
    }

    out.push_str("## Sentiment Breakdown\n");
    let largest = bundle.chart.iter().map(|row| row.count).max().unwrap_or(0);
    for row in &bundle.chart {
        out.push_str(&format!(
            "{:<10}{:<BAR_WIDTH$} {}\n",
            row.sentiment,
            bar(row.count, largest),
            row.count,
        ));
    }
    out.push('\n');

    out.push_str("## Top Posts\n");
    for opinion in &bundle.opinions {
        out.push_str(&format!(
            "- {} ({} points, {})\n  {}\n",
            opinion.title,
            opinion.score,
            opinion.created_at.format("%Y-%m-%d"),
            opinion.url
        ));
    }

    out
}

fn banner(scope: &Scope, query: &str) -> String {
    match scope {
        Scope::All => format!("Listening in on what people are saying about **{query}** on Reddit"),
        Scope::Community(name) => {
            format!("Listening in on what people are saying about **{query}** on r/{name}")
        }
    }
}

/// Bar scaled so that `largest` fills the full width.
fn bar(count: u32, largest: u32) -> String {
    if largest == 0 {
        return String::new();
    }
    let filled = u64::from(count) * BAR_WIDTH as u64 / u64::from(largest);
    "#".repeat(usize::try_from(filled).unwrap_or(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandwhisper_core::{
        Grade, Opinion, OverallSentiment, QualityReport, ScoreResult, SentimentTally,
    };
    use brandwhisper_sentiment::{AnalysisRequest, AnalysisStatus};
    use chrono::{TimeZone, Utc};

    fn complete_bundle() -> AnalysisBundle {
        let tally = SentimentTally {
            positive: 5,
            negative: 2,
            neutral: 1,
            summary: "Comfortable but pricey.".to_string(),
        };
        AnalysisBundle {
            status: AnalysisStatus::Complete,
            scope: Scope::Community("nike".to_string()),
            query: "shoes".to_string(),
            summary_text: "### General opinions on 'shoes' from nike:".to_string(),
            opinions: vec![Opinion {
                title: "Love my new runners".to_string(),
                score: 321,
                url: "https://reddit.com/r/nike/comments/abc/".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap(),
            }],
            chart: tally.chart_rows(),
            overall: Some(OverallSentiment::from_tally(&tally)),
            tally: Some(tally),
            quality: Some(QualityReport("Build quality holds up.".to_string())),
            score: Some(ScoreResult {
                percent: 68.8,
                grade: Grade::Positive,
            }),
        }
    }

    #[test]
    fn banner_names_community_or_reddit() {
        assert_eq!(
            banner(&Scope::Community("nike".to_string()), "shoes"),
            "Listening in on what people are saying about **shoes** on r/nike"
        );
        assert!(banner(&Scope::All, "shoes").ends_with("on Reddit"));
    }

    #[test]
    fn empty_bundle_prints_no_results() {
        let request = AnalysisRequest::new(Scope::All, "shoes");
        let text = report(&AnalysisBundle::no_opinions(&request));
        assert!(text.contains("No relevant posts found."));
        assert!(!text.contains("Sentiment Score"));
    }

    #[test]
    fn complete_report_has_every_section() {
        let text = report(&complete_bundle());
        assert!(text.contains("Comfortable but pricey."));
        assert!(text.contains("Build quality holds up."));
        assert!(text.contains("68.8%\n"));
        assert!(text.contains("Grade: Positive\n"));
        assert!(text.contains("nike on \"shoes\""));
        assert!(text.contains("- Love my new runners (321 points, 2024-03-09)"));
        assert!(text.contains("https://reddit.com/r/nike/comments/abc/"));
    }

    #[test]
    fn breakdown_rows_keep_chart_order() {
        let text = report(&complete_bundle());
        let positive = text.find("Positive  ").unwrap();
        let negative = text.find("Negative  ").unwrap();
        let neutral = text.find("Neutral   ").unwrap();
        assert!(positive < negative && negative < neutral);
    }

    #[test]
    fn sections_follow_report_order() {
        let text = report(&complete_bundle());
        let headings = [
            "Listening in on",
            "## Brand Summary",
            "## Product Quality",
            "## Sentiment Score",
            "## Sentiment Breakdown",
            "## Top Posts",
        ];
        let positions: Vec<usize> = headings.iter().map(|h| text.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(text.ends_with("https://reddit.com/r/nike/comments/abc/\n"));
    }

    #[test]
    fn bar_scales_to_largest_count() {
        assert_eq!(bar(5, 5).len(), 30);
        assert_eq!(bar(1, 2).len(), 15);
        assert!(bar(0, 0).is_empty());
    }
}
