//! Sentence and whitespace utilities shared across the pipeline.
//!
//! Sentence boundaries are `.`, `!`, or `?` followed by whitespace; the
//! trailing fragment (if any) counts as a sentence too. This is the single
//! tokenizer used by chunking, summarization post-processing, and example
//! cleanup, so their sentence counts always agree.

/// Split text at sentence boundaries (`.`, `!`, `?` followed by whitespace).
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let chars: Vec<char> = text.chars().collect();
    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);
        if (ch == '.' || ch == '!' || ch == '?')
            && i + 1 < chars.len()
            && chars[i + 1].is_whitespace()
        {
            let trimmed = current.trim().to_string();
            if !trimmed.is_empty() {
                sentences.push(trimmed);
            }
            current.clear();
        }
    }
    let trimmed = current.trim().to_string();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
    sentences
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = true; // leading whitespace is dropped
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Truncate text to the first `n` complete sentences, dropping any trailing
/// incomplete sentence.
pub fn first_sentences(text: &str, n: usize) -> String {
    let sentences = split_sentences(text);
    let take = sentences.len().min(n);
    let mut joined = sentences[..take].join(" ");

    // Drop a trailing fragment that never reached a terminator.
    if !joined.is_empty() && !joined.ends_with(['.', '!', '?']) {
        let last_stop = joined
            .rfind('.')
            .into_iter()
            .chain(joined.rfind('!'))
            .chain(joined.rfind('?'))
            .max();
        match last_stop {
            Some(pos) if pos > 0 => joined.truncate(pos + 1),
            _ => {}
        }
    }
    joined
}
