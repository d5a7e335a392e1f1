//! Salience ranking: pick the sentences most representative of a span.
//!
//! Sentences are embedded as l2-normalized term-frequency vectors and scored
//! by cosine similarity against the whole span's vector. `BTreeMap` keeps
//! the arithmetic order fixed, so scores (and therefore selections) are
//! bit-for-bit reproducible.

use std::collections::BTreeMap;

/// Lowercased alphanumeric term counts.
fn term_vector(input: &str) -> BTreeMap<String, f32> {
    let mut counts: BTreeMap<String, f32> = BTreeMap::new();
    for token in input.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() {
            continue;
        }
        *counts.entry(token.to_lowercase()).or_insert(0.0) += 1.0;
    }
    counts
}

fn cosine(a: &BTreeMap<String, f32>, b: &BTreeMap<String, f32>) -> f32 {
    let mut dot = 0.0f32;
    for (term, weight) in a {
        if let Some(other) = b.get(term) {
            dot += weight * other;
        }
    }
    let norm_a: f32 = a.values().map(|w| w * w).sum::<f32>().sqrt();
    let norm_b: f32 = b.values().map(|w| w * w).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Select the `n` sentences most similar to `original`, returned in their
/// original order. Ties break toward the earlier sentence.
pub fn select_representative(sentences: &[String], original: &str, n: usize) -> Vec<String> {
    if sentences.len() <= n {
        return sentences.to_vec();
    }

    let original_vec = term_vector(original);
    let mut scored: Vec<(usize, f32)> = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| (i, cosine(&term_vector(s), &original_vec)))
        .collect();

    scored.sort_by(|(ia, sa), (ib, sb)| sb.total_cmp(sa).then(ia.cmp(ib)));

    let mut selected: Vec<usize> = scored.iter().take(n).map(|(i, _)| *i).collect();
    selected.sort_unstable();
    selected.into_iter().map(|i| sentences[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keeps_all_when_under_limit() {
        let s = sentences(&["A.", "B."]);
        assert_eq!(select_representative(&s, "A. B.", 5), s);
    }

    #[test]
    fn picks_on_topic_sentences_in_original_order() {
        let original = "Gravity pulls masses together. Gravity acts at a distance. \
                        Gravity shapes orbits.";
        let s = sentences(&[
            "Gravity pulls masses together and shapes orbits.",
            "Unrelated digression about cooking recipes.",
            "Gravity acts at a distance on masses.",
        ]);
        let picked = select_representative(&s, original, 2);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked[0], s[0]);
        assert_eq!(picked[1], s[2]);
    }

    #[test]
    fn ties_break_toward_earlier_sentence() {
        let s = sentences(&["same words here.", "same words here.", "other thing entirely."]);
        let picked = select_representative(&s, "same words here.", 1);
        assert_eq!(picked, vec![s[0].clone()]);
    }

    #[test]
    fn deterministic_selection() {
        let original = "alpha beta gamma delta. beta gamma. alpha delta.";
        let s = sentences(&[
            "alpha beta gamma.",
            "beta gamma delta.",
            "gamma delta alpha.",
            "off topic words.",
        ]);
        let a = select_representative(&s, original, 2);
        let b = select_representative(&s, original, 2);
        assert_eq!(a, b);
    }
}
