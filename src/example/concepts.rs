//! Key-concept extraction for generation prompts.
//!
//! Three tiers, first success wins: quoted phrases, then capitalized
//! multi-word phrases, then the topic's first sentence as a last resort.

use std::sync::LazyLock;

use regex::Regex;

use crate::text;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"\n]{3,80})""#).expect("quoted phrase pattern"));

static CAPITALIZED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)\b").expect("capitalized phrase pattern")
});

/// Concepts worth prompting about, in document order. Never empty for text
/// containing at least one non-whitespace character.
pub fn key_concepts(topic_text: &str) -> Vec<String> {
    let quoted: Vec<String> = QUOTED
        .captures_iter(topic_text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if !quoted.is_empty() {
        return quoted;
    }

    let capitalized: Vec<String> = CAPITALIZED
        .captures_iter(topic_text)
        .map(|caps| caps[1].to_string())
        .collect();
    if !capitalized.is_empty() {
        return capitalized;
    }

    text::split_sentences(topic_text)
        .into_iter()
        .next()
        .map(|s| vec![s])
        .unwrap_or_default()
}
