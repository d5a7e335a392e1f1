//! Segment boundaries and the shared strategy runner.
//!
//! Both granularities (chapters over the document, topics over a chapter)
//! use the same scheme: an ordered list of pure strategies, each returning
//! candidate boundaries or nothing, applied until one produces a non-empty
//! result. Boundaries are then closed into a gapless, overlap-free partition
//! of the owning text.

use std::ops::Range;

/// A candidate boundary: a title and the byte offset where its span starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub title: String,
    pub start: usize,
}

impl Segment {
    pub fn new(title: impl Into<String>, start: usize) -> Self {
        Self {
            title: title.into(),
            start,
        }
    }
}

/// A strategy inspects its input and either claims the split (possibly with
/// empty spans) by returning `Some`, or passes with `None`.
pub type Strategy<T> = fn(&T) -> Option<Vec<Segment>>;

/// Apply strategies in order; the first non-empty result wins.
pub fn run_strategies<T: ?Sized>(input: &T, strategies: &[Strategy<T>]) -> Option<Vec<Segment>> {
    for strategy in strategies {
        if let Some(segments) = strategy(input) {
            if !segments.is_empty() {
                return Some(segments);
            }
        }
    }
    None
}

/// Close segment boundaries into a partition of `[0, text_len)`.
///
/// Segments are ordered by start offset (stable, so equal offsets keep their
/// given order and yield empty spans), the first start is clamped to 0 so no
/// prefix is lost, and each span runs to the next segment's start.
pub fn partition(text_len: usize, mut segments: Vec<Segment>) -> Vec<(Segment, Range<usize>)> {
    segments.sort_by_key(|s| s.start);

    let mut out = Vec::with_capacity(segments.len());
    for i in 0..segments.len() {
        let start = if i == 0 {
            0
        } else {
            segments[i].start.min(text_len)
        };
        let end = if i + 1 < segments.len() {
            segments[i + 1].start.min(text_len).max(start)
        } else {
            text_len
        };
        out.push((segments[i].clone(), start..end));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_whole_text() {
        let segs = vec![Segment::new("b", 10), Segment::new("a", 4)];
        let parts = partition(20, segs);
        assert_eq!(parts[0].1, 0..10); // first span clamped to 0
        assert_eq!(parts[0].0.title, "a");
        assert_eq!(parts[1].1, 10..20);
        let total: usize = parts.iter().map(|(_, r)| r.len()).sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn equal_offsets_yield_empty_span() {
        let segs = vec![Segment::new("a", 0), Segment::new("b", 5), Segment::new("c", 5)];
        let parts = partition(9, segs);
        assert_eq!(parts[1].1, 5..5);
        assert_eq!(parts[2].1, 5..9);
    }

    #[test]
    fn runner_takes_first_non_empty() {
        fn none(_: &()) -> Option<Vec<Segment>> {
            None
        }
        fn empty(_: &()) -> Option<Vec<Segment>> {
            Some(vec![])
        }
        fn hit(_: &()) -> Option<Vec<Segment>> {
            Some(vec![Segment::new("x", 0)])
        }
        fn unreached(_: &()) -> Option<Vec<Segment>> {
            Some(vec![Segment::new("y", 1)])
        }
        let result = run_strategies(&(), &[none, empty, hit, unreached]).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "x");
    }
}
