//! Chapter identification strategies.
//!
//! Three tiers, first success wins, no blending:
//! 1. TOC-driven: level-1 entries (or titles containing "chapter"), page
//!    ranges mapped to character offsets
//! 2. Heading patterns over the full concatenated text
//! 3. Single-chapter fallback

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::TocEntry;
use crate::structure::segment::{Segment, Strategy};

/// Ordered heading patterns. The first pattern producing at least one match
/// claims the split; matches are never merged across patterns.
static CHAPTER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\bchapter\s+\d+[\s:]+([^\n]+)").expect("chapter heading pattern"),
        Regex::new(r"(?m)^\d+\.\s+([^\n]+)").expect("numbered heading pattern"),
    ]
});

/// Input to the chapter strategies: the extraction signals plus the
/// concatenated text they index into.
pub struct ChapterInput<'a> {
    pub toc: &'a [TocEntry],
    pub full_text: &'a str,
    /// Byte offset of each page within `full_text`.
    pub page_offsets: &'a [usize],
}

/// The ordered chapter strategy list.
///
/// The casts pin each fn item to the caller's `ChapterInput` lifetime;
/// without them array inference rejects the more general fn types.
pub fn strategies<'a>() -> [Strategy<ChapterInput<'a>>; 3] {
    [
        toc_strategy as Strategy<ChapterInput<'a>>,
        pattern_strategy as Strategy<ChapterInput<'a>>,
        single_chapter as Strategy<ChapterInput<'a>>,
    ]
}

/// Tier 1: chapters from table-of-contents entries.
///
/// Entry *i* covers pages `[page_i, page_{i+1} - 1]` (the last entry runs to
/// the end of the document). Expressed as offsets this means each entry
/// starts a span at its page's offset; starts are clamped monotonically
/// non-decreasing so out-of-order or duplicate-page entries yield empty-text
/// chapters, which are retained.
fn toc_strategy(input: &ChapterInput) -> Option<Vec<Segment>> {
    let filtered: Vec<&TocEntry> = input
        .toc
        .iter()
        .filter(|e| e.level == 1 || e.title.to_lowercase().contains("chapter"))
        .collect();
    if filtered.is_empty() {
        return None;
    }

    let mut segments = Vec::with_capacity(filtered.len());
    let mut floor = 0usize;
    for entry in filtered {
        let page_idx = entry.page.clamp(1, input.page_offsets.len()) - 1;
        let start = input.page_offsets[page_idx].max(floor);
        floor = start;
        // TOC titles are kept verbatim.
        segments.push(Segment::new(entry.title.clone(), start));
    }
    Some(segments)
}

/// Tier 2: heading patterns over the concatenated document text.
fn pattern_strategy(input: &ChapterInput) -> Option<Vec<Segment>> {
    segments_from_patterns(input.full_text, &CHAPTER_PATTERNS)
}

/// Tier 3: the whole document as one chapter.
fn single_chapter(_: &ChapterInput) -> Option<Vec<Segment>> {
    Some(vec![Segment::new("Chapter 1", 0)])
}

/// Run ordered patterns against `text`; the first with a match yields one
/// segment per match (captured group as title, else the full match).
pub(crate) fn segments_from_patterns(text: &str, patterns: &[Regex]) -> Option<Vec<Segment>> {
    for pattern in patterns {
        let segments: Vec<Segment> = pattern
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).expect("match group 0");
                let title = caps
                    .get(1)
                    .map(|g| g.as_str())
                    .unwrap_or_else(|| whole.as_str());
                Segment::new(title.trim(), whole.start())
            })
            .collect();
        if !segments.is_empty() {
            return Some(segments);
        }
    }
    None
}
