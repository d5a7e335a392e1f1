//! Example harvesting and generation.
//!
//! Per topic: **extract** literal example spans from the text, and only when
//! fewer than requested are found, **generate** the remainder through the
//! model collaborator, seeded with key concepts from the topic. A failed
//! generation call becomes a placeholder, never a retry and never fatal.

pub mod concepts;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::GenerativeModel;
use crate::text;

/// Examples keyed by topic id.
pub type ExampleArtifacts = BTreeMap<String, Vec<String>>;

/// Trimmed spans at or below this length are discarded.
const MIN_EXAMPLE_CHARS: usize = 20;
/// Token ceiling per generation call.
const GENERATION_MAX_LEN: usize = 150;
/// Generated examples are cut to this many complete sentences.
const MAX_EXAMPLE_SENTENCES: usize = 5;
/// Topic prefix length for the no-concept fallback prompt.
const PROMPT_CONTEXT_CHARS: usize = 100;

/// `Example 1:`-style markers. A span runs to the next such marker or the
/// end of the topic.
static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexample\s+\d+\s*:").expect("numbered example pattern"));

/// Inline example cues. A span runs to the next blank line or the end.
static INLINE_MARKERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bfor example\b").expect("for-example pattern"),
        Regex::new(r"(?i)\be\.g\.").expect("e.g. pattern"),
    ]
});

/// Harvests and synthesizes examples over a generative collaborator.
pub struct ExampleEngine<'a> {
    model: &'a dyn GenerativeModel,
}

impl<'a> ExampleEngine<'a> {
    pub fn new(model: &'a dyn GenerativeModel) -> Self {
        Self { model }
    }

    /// Produce up to `count` examples for a topic. Extracted spans come
    /// first, unmodified; generation only fills the shortfall. The result is
    /// shorter than `count` only when a generated text survives cleanup at
    /// 20 characters or fewer.
    pub fn generate_examples(&self, topic_text: &str, count: usize) -> Vec<String> {
        let mut examples = extract_examples(topic_text);
        examples.truncate(count);
        if examples.len() < count {
            tracing::debug!(
                extracted = examples.len(),
                requested = count,
                "generating remaining examples"
            );
            self.generate_missing(topic_text, count, &mut examples);
        }
        examples
    }

    fn generate_missing(&self, topic_text: &str, count: usize, examples: &mut Vec<String>) {
        let concepts = concepts::key_concepts(topic_text);
        let mut next_concept = 0usize;

        for slot in examples.len()..count {
            let prompt = if concepts.is_empty() {
                let prefix: String = topic_text.chars().take(PROMPT_CONTEXT_CHARS).collect();
                format!("Example for this topic: {prefix}...")
            } else {
                let concept = &concepts[next_concept % concepts.len()];
                next_concept += 1;
                format!("Example of {concept}: ")
            };

            match self.model.generate(&prompt, GENERATION_MAX_LEN) {
                Ok(raw) => {
                    let cleaned =
                        text::first_sentences(&text::clean_text(&raw), MAX_EXAMPLE_SENTENCES);
                    if cleaned.chars().count() > MIN_EXAMPLE_CHARS {
                        examples.push(cleaned);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "example generation failed, using placeholder");
                    examples.push(format!(
                        "Example {}: This is a placeholder example for the topic.",
                        slot + 1
                    ));
                }
            }
        }
    }
}

/// Literal example spans in first-come order: numbered markers first, then
/// inline cues, keeping trimmed spans longer than 20 characters.
///
/// Numbered spans carry only the text after the `Example N:` marker; the
/// renderers prepend their own numbered labels.
pub(crate) fn extract_examples(text: &str) -> Vec<String> {
    let mut found = Vec::new();

    let markers: Vec<(usize, usize)> = NUMBERED_MARKER
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();
    for (i, &(_, body_start)) in markers.iter().enumerate() {
        let end = markers.get(i + 1).map(|&(next, _)| next).unwrap_or(text.len());
        push_span(&mut found, &text[body_start..end]);
    }

    for pattern in INLINE_MARKERS.iter() {
        for m in pattern.find_iter(text) {
            let rest = &text[m.start()..];
            let end = rest.find("\n\n").unwrap_or(rest.len());
            push_span(&mut found, &rest[..end]);
        }
    }

    found
}

fn push_span(found: &mut Vec<String>, span: &str) {
    let trimmed = span.trim();
    if trimmed.chars().count() > MIN_EXAMPLE_CHARS {
        found.push(trimmed.to_string());
    }
}
