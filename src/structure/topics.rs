//! Topic identification strategies, applied per chapter.
//!
//! Three tiers mirroring the chapter tiers:
//! 1. Sub-heading patterns (decimal-dotted numbering, capitalized lines)
//! 2. Paragraph grouping on upper-case heading paragraphs
//! 3. Single-topic fallback
//!
//! Chapter text preceding the first detected heading is never dropped: the
//! pattern tier extends the first topic's span back to the chapter start,
//! and the paragraph tier emits an implicit "Introduction" topic, so topic
//! spans always partition the chapter text.

use std::sync::LazyLock;

use regex::Regex;

use crate::structure::chapters::segments_from_patterns;
use crate::structure::segment::{Segment, Strategy};

/// Ordered sub-heading patterns; first with a match wins.
static TOPIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\b\d+\.\d+\s+([^\n]+)").expect("dotted heading pattern"),
        Regex::new(r"(?m)^[A-Z][^\n.]+\n").expect("capitalized heading pattern"),
    ]
});

/// Heading paragraphs shorter than this (in characters) qualify.
const MAX_HEADING_CHARS: usize = 100;

/// The ordered topic strategy list.
pub const STRATEGIES: &[Strategy<str>] = &[pattern_strategy, paragraph_strategy, single_topic];

/// Tier 1: sub-heading patterns over the chapter text.
fn pattern_strategy(text: &str) -> Option<Vec<Segment>> {
    segments_from_patterns(text, &TOPIC_PATTERNS)
}

/// Tier 2: group blank-line paragraphs under upper-case heading paragraphs.
///
/// A paragraph under 100 characters that is entirely upper-case starts a new
/// topic. Text before the first heading becomes an "Introduction" topic when
/// it has any content; a whitespace-only prefix is absorbed by the first
/// heading's span instead.
fn paragraph_strategy(text: &str) -> Option<Vec<Segment>> {
    let mut headings = Vec::new();
    for (start, para) in paragraphs_with_offsets(text) {
        let trimmed = para.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.chars().count() < MAX_HEADING_CHARS && is_upper(trimmed) {
            headings.push(Segment::new(trimmed, start));
        }
    }
    if headings.is_empty() {
        return None;
    }

    let first_start = headings[0].start;
    if !text[..first_start].trim().is_empty() {
        headings.insert(0, Segment::new("Introduction", 0));
    }
    Some(headings)
}

/// Tier 3: the whole chapter as one topic.
fn single_topic(_: &str) -> Option<Vec<Segment>> {
    Some(vec![Segment::new("Main Topic", 0)])
}

/// Blank-line-separated paragraphs with their byte offsets.
fn paragraphs_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = 0usize;
    for (idx, _) in text.match_indices("\n\n") {
        if idx >= start {
            out.push((start, &text[start..idx]));
            start = idx + 2;
        }
    }
    out.push((start, &text[start..]));
    out
}

/// Upper-case check with Python `str.isupper` semantics: at least one cased
/// character and no lower-case ones.
fn is_upper(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::segment::run_strategies;

    #[test]
    fn dotted_headings_detected() {
        let text = "1.1 Vectors\nvector text here.\n1.2 Scalars\nscalar text here.";
        let segs = run_strategies(text, STRATEGIES).unwrap();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].title, "Vectors");
        assert_eq!(segs[1].title, "Scalars");
    }

    #[test]
    fn capitalized_lines_when_no_dotted_headings() {
        let text = "Motion Basics\nbody text follows here\nMore ideas\nclosing text\n";
        let segs = run_strategies(text, STRATEGIES).unwrap();
        // "More ideas" has no period and starts upper-case: both heading
        // lines match the capitalized pattern.
        assert!(segs.iter().any(|s| s.title.starts_with("Motion Basics")));
    }

    #[test]
    fn upper_case_paragraphs_group_topics() {
        let text = "intro before any heading.\n\nFIRST LAW\n\nbody one.\n\nSECOND LAW\n\nbody two.";
        let segs = paragraph_strategy(text).unwrap();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].title, "Introduction");
        assert_eq!(segs[0].start, 0);
        assert_eq!(segs[1].title, "FIRST LAW");
        assert_eq!(segs[2].title, "SECOND LAW");
    }

    #[test]
    fn no_introduction_for_whitespace_prefix() {
        let text = "\n\nFIRST LAW\n\nbody one.";
        let segs = paragraph_strategy(text).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].title, "FIRST LAW");
    }

    #[test]
    fn fallback_single_topic() {
        let segs = run_strategies("lower case prose. nothing else.", STRATEGIES).unwrap();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].title, "Main Topic");
    }

    #[test]
    fn is_upper_semantics() {
        assert!(is_upper("FIRST LAW"));
        assert!(is_upper("LAW 2"));
        assert!(!is_upper("First Law"));
        assert!(!is_upper("123")); // no cased characters
    }
}
