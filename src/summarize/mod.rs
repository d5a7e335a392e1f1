//! Summarization orchestrator.
//!
//! Spans below the no-op threshold pass through unchanged. Longer spans are
//! chunked at sentence boundaries, each chunk summarized through the model
//! collaborator, and a failed chunk replaced by its leading sentences
//! (deterministic local recovery, never a retry). Topic summaries are capped
//! at five salience-ranked sentences; chapter summaries with six or more
//! sentences are reflowed into exactly two paragraphs.

pub mod chunk;
pub mod salience;

use std::collections::BTreeMap;

use crate::model::SummaryModel;
use crate::text;

/// Word count below which topic summarization is a no-op.
const TOPIC_NOOP_WORDS: usize = 100;
/// Word count below which chapter summarization is a no-op.
const CHAPTER_NOOP_WORDS: usize = 200;

/// Token ceiling/floor per topic chunk call.
const TOPIC_MAX_LEN: usize = 150;
const TOPIC_MIN_LEN: usize = 30;

/// Token budget shared across chapter chunk calls, and its floor.
const CHAPTER_MAX_LEN: usize = 300;
const CHAPTER_MIN_LEN: usize = 50;

/// Leading sentences substituted for a failed chunk call.
const TOPIC_FALLBACK_SENTENCES: usize = 3;
const CHAPTER_FALLBACK_SENTENCES: usize = 5;

/// Topic summaries are trimmed to this many sentences.
const TOPIC_MAX_SENTENCES: usize = 5;
/// Chapter summaries reflow into two paragraphs at this sentence count.
const CHAPTER_PARAGRAPH_THRESHOLD: usize = 6;

/// Summaries keyed by the structure's chapter/topic ids. Populated after
/// inference; never touches the structure itself.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SummaryArtifacts {
    pub chapters: BTreeMap<usize, String>,
    pub topics: BTreeMap<String, String>,
}

/// Orchestrates chunked summarization over a model collaborator.
pub struct Summarizer<'a> {
    model: &'a dyn SummaryModel,
    chunk_tokens: usize,
}

impl<'a> Summarizer<'a> {
    pub fn new(model: &'a dyn SummaryModel) -> Self {
        Self {
            model,
            chunk_tokens: chunk::DEFAULT_CHUNK_TOKENS,
        }
    }

    /// Summarize a topic span into at most five sentences.
    pub fn summarize_topic(&self, span: &str) -> String {
        if text::word_count(span) < TOPIC_NOOP_WORDS {
            return span.to_string();
        }

        let combined = self.summarize_chunks(span, |_| (TOPIC_MAX_LEN, TOPIC_MIN_LEN), TOPIC_FALLBACK_SENTENCES);

        let sentences = text::split_sentences(&combined);
        if sentences.len() > TOPIC_MAX_SENTENCES {
            salience::select_representative(&sentences, span, TOPIC_MAX_SENTENCES).join(" ")
        } else {
            combined
        }
    }

    /// Summarize a chapter span into one block or two paragraphs.
    pub fn summarize_chapter(&self, span: &str) -> String {
        if text::word_count(span) < CHAPTER_NOOP_WORDS {
            return span.to_string();
        }

        let combined = self.summarize_chunks(
            span,
            |chunk_count| ((CHAPTER_MAX_LEN / chunk_count).max(1), CHAPTER_MIN_LEN),
            CHAPTER_FALLBACK_SENTENCES,
        );

        let sentences = text::split_sentences(&combined);
        if sentences.len() >= CHAPTER_PARAGRAPH_THRESHOLD {
            let mid = sentences.len() / 2;
            format!("{}\n\n{}", sentences[..mid].join(" "), sentences[mid..].join(" "))
        } else {
            combined
        }
    }

    /// Chunk the span and summarize each chunk, substituting leading
    /// sentences for any chunk whose model call fails.
    fn summarize_chunks(
        &self,
        span: &str,
        budgets: impl Fn(usize) -> (usize, usize),
        fallback_sentences: usize,
    ) -> String {
        let chunks = chunk::split_into_chunks(span, self.chunk_tokens);
        let (max_len, min_len) = budgets(chunks.len().max(1));

        let mut summaries = Vec::with_capacity(chunks.len());
        for chunk_text in &chunks {
            match self.model.summarize(chunk_text, max_len, min_len) {
                Ok(summary) => summaries.push(summary),
                Err(err) => {
                    tracing::warn!(error = %err, "chunk summarization failed, using leading sentences");
                    let sentences = text::split_sentences(chunk_text);
                    let take = sentences.len().min(fallback_sentences);
                    summaries.push(sentences[..take].join(" "));
                }
            }
        }
        summaries.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::model::ModelError;

    /// Returns a fixed summary per call and counts invocations.
    struct FixedModel {
        reply: String,
        calls: Cell<usize>,
    }

    impl FixedModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.into(),
                calls: Cell::new(0),
            }
        }
    }

    impl SummaryModel for FixedModel {
        fn summarize(&self, _: &str, _: usize, _: usize) -> Result<String, ModelError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.reply.clone())
        }
    }

    /// Always fails, forcing the leading-sentence fallback.
    struct FailingModel;

    impl SummaryModel for FailingModel {
        fn summarize(&self, _: &str, _: usize, _: usize) -> Result<String, ModelError> {
            Err(ModelError::RequestFailed {
                message: "boom".into(),
            })
        }
    }

    fn words(n: usize) -> String {
        let mut out = String::new();
        for i in 0..n {
            if i > 0 {
                out.push(' ');
            }
            out.push_str("word");
        }
        out.push('.');
        out
    }

    #[test]
    fn short_topic_is_a_noop() {
        let span = words(50);
        let model = FixedModel::new("unused.");
        let summarizer = Summarizer::new(&model);
        assert_eq!(summarizer.summarize_topic(&span), span);
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn short_chapter_is_a_noop() {
        let span = words(150);
        let model = FixedModel::new("unused.");
        let summarizer = Summarizer::new(&model);
        assert_eq!(summarizer.summarize_chapter(&span), span);
        assert_eq!(model.calls.get(), 0);
    }

    #[test]
    fn long_topic_calls_model_once_per_chunk() {
        let span = words(120);
        let model = FixedModel::new("A concise summary.");
        let summarizer = Summarizer::new(&model);
        let out = summarizer.summarize_topic(&span);
        assert_eq!(out, "A concise summary.");
        assert_eq!(model.calls.get(), 1);
    }

    #[test]
    fn failed_topic_chunk_uses_first_three_sentences() {
        let mut span = String::from(
            "First sentence here with several words inside it. \
             Second sentence also has plenty of words inside it. \
             Third sentence continues with more words in place. \
             Fourth sentence should not appear in the fallback. ",
        );
        for _ in 0..12 {
            span.push_str("Extra filler sentence with more padding words inside. ");
        }
        assert!(text::word_count(&span) >= TOPIC_NOOP_WORDS);
        let summarizer = Summarizer::new(&FailingModel);
        let out = summarizer.summarize_topic(&span);
        assert!(out.starts_with("First sentence here"));
        assert!(out.contains("Third sentence"));
        assert!(!out.contains("Fourth sentence"));
    }

    #[test]
    fn six_sentence_chapter_summary_breaks_after_third() {
        let span = words(250);
        let model = FixedModel::new("S1 one. S2 two. S3 three. S4 four. S5 five. S6 six.");
        let summarizer = Summarizer::new(&model);
        let out = summarizer.summarize_chapter(&span);
        let paragraphs: Vec<&str> = out.split("\n\n").collect();
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0], "S1 one. S2 two. S3 three.");
        assert_eq!(paragraphs[1], "S4 four. S5 five. S6 six.");
    }

    #[test]
    fn five_sentence_chapter_summary_stays_one_block() {
        let span = words(250);
        let model = FixedModel::new("S1 a. S2 b. S3 c. S4 d. S5 e.");
        let summarizer = Summarizer::new(&model);
        let out = summarizer.summarize_chapter(&span);
        assert!(!out.contains("\n\n"));
    }

    #[test]
    fn overlong_topic_summary_is_trimmed_to_five_sentences() {
        let span = words(120);
        let model = FixedModel::new("A one. B two. C three. D four. E five. F six. G seven.");
        let summarizer = Summarizer::new(&model);
        let out = summarizer.summarize_topic(&span);
        assert_eq!(text::split_sentences(&out).len(), 5);
    }
}
