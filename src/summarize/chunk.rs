//! Sentence-bounded chunking for model input budgets.
//!
//! Token counts are approximated as words plus a small per-sentence
//! tokenization overhead; a chunk never splits a sentence, so a single
//! over-budget sentence becomes its own chunk.

use crate::text;

/// Default approximate token budget per chunk.
pub const DEFAULT_CHUNK_TOKENS: usize = 1024;

/// Per-sentence allowance for tokenizer overhead.
const SENTENCE_OVERHEAD: usize = 5;

/// Split text into sentence-bounded chunks within `max_tokens`.
pub fn split_into_chunks(input: &str, max_tokens: usize) -> Vec<String> {
    let sentences = text::split_sentences(input);
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_size = 0usize;

    for sentence in sentences {
        let sentence_size = text::word_count(&sentence) + SENTENCE_OVERHEAD;
        if current_size + sentence_size > max_tokens && !current.is_empty() {
            chunks.push(current.join(" "));
            current = vec![sentence];
            current_size = sentence_size;
        } else {
            current.push(sentence);
            current_size += sentence_size;
        }
    }
    if !current.is_empty() {
        chunks.push(current.join(" "));
    }
    chunks
}
