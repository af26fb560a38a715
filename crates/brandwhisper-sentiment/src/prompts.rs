//! Prompt text sent to the language model.

use std::fmt::Write as _;

use brandwhisper_core::{Opinion, Scope};

/// Bulk classification prompt: every title as a bullet plus the reply template
/// that [`crate::parser::ParsedReply`] understands.
#[must_use]
pub fn sentiment_prompt(opinions: &[Opinion], scope: &Scope, query: &str) -> String {
    let mut titles = String::new();
    for opinion in opinions {
        let _ = writeln!(titles, "- {}", opinion.title.replace('\n', " "));
    }

    format!(
        "You are analyzing Reddit discussions from {scope} about the product '{query}'.\n\n\
         Here are the post titles:\n{titles}\n\
         1. Count how many posts are Positive, Negative, or Neutral.\n\
         2. Write a brief summary of how users feel.\n\
         Respond in this format:\n\
         Positive: X\nNegative: Y\nNeutral: Z\n\nSummary: <your summary here>"
    )
}

/// Stakeholder-facing quality narrative prompt built from the classifier's summary.
#[must_use]
pub fn quality_prompt(summary: &str, scope: &Scope, query: &str) -> String {
    format!(
        "You are a professional quality control engineer and product manager at {scope}.\n\
         In 3-5 sentences, analyze the following summary of Reddit posts about '{query}' \
         and give a detailed assessment of the product quality. \
         Use a casual but professional tone; this is the summary you will present out loud \
         to stakeholders and leadership:\n\n{summary}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn opinion(title: &str) -> Opinion {
        Opinion {
            title: title.to_string(),
            score: 0,
            url: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn sentiment_prompt_lists_every_title_as_bullet() {
        let prompt = sentiment_prompt(
            &[opinion("Love them"), opinion("Fell apart\nin a week")],
            &Scope::Community("nike".to_string()),
            "shoes",
        );
        assert!(prompt.contains("from nike about the product 'shoes'"));
        assert!(prompt.contains("- Love them\n"));
        assert!(prompt.contains("- Fell apart in a week\n"));
        assert!(prompt.ends_with("Summary: <your summary here>"));
    }

    #[test]
    fn quality_prompt_embeds_summary_not_titles() {
        let prompt = quality_prompt("Mostly happy", &Scope::All, "shoes");
        assert!(prompt.contains("product manager at all"));
        assert!(prompt.ends_with("\n\nMostly happy"));
    }
}
