//! Document structure inference: the core engine.
//!
//! Consumes a canonical [`ExtractionResult`](crate::extract::ExtractionResult)
//! and rebuilds, from scratch on every call, an ordered tree of chapters and
//! topics whose text spans partition the concatenated document text without
//! gaps or overlaps. The engine never fails: every tier degrades to the next
//! and the result always holds at least one chapter with at least one topic.

pub mod chapters;
pub mod segment;
pub mod topics;

use serde::{Deserialize, Serialize};

use crate::extract::ExtractionResult;
use crate::structure::chapters::ChapterInput;
use crate::structure::segment::{partition, run_strategies};

/// A topic within a chapter. `text` is a contiguous substring of the owning
/// chapter's text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// `"<chapter_id>.<topic_index>"`, both 1-based.
    pub id: String,
    pub title: String,
    pub text: String,
}

/// A chapter. `text` is a contiguous substring of the concatenated document
/// text; chapter spans cover it completely, in page order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// 1-based, monotonically increasing in document order.
    pub id: usize,
    pub title: String,
    pub text: String,
    pub topics: Vec<Topic>,
}

/// The inferred chapter/topic tree. Sole key-space for all downstream
/// artifacts; rebuilt fully on each analysis, never patched in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStructure {
    pub chapters: Vec<Chapter>,
}

impl DocumentStructure {
    /// Iterate `(chapter, topic)` pairs in document order.
    pub fn topics(&self) -> impl Iterator<Item = (&Chapter, &Topic)> {
        self.chapters
            .iter()
            .flat_map(|c| c.topics.iter().map(move |t| (c, t)))
    }
}

/// Shallow outline of a structure for display and JSON dumps: ids, titles,
/// and span sizes without the spans themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureOutline {
    pub chapters: Vec<ChapterOutline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterOutline {
    pub id: usize,
    pub title: String,
    pub text_bytes: usize,
    pub topics: Vec<TopicOutline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicOutline {
    pub id: String,
    pub title: String,
    pub text_bytes: usize,
}

impl From<&DocumentStructure> for StructureOutline {
    fn from(structure: &DocumentStructure) -> Self {
        Self {
            chapters: structure
                .chapters
                .iter()
                .map(|c| ChapterOutline {
                    id: c.id,
                    title: c.title.clone(),
                    text_bytes: c.text.len(),
                    topics: c
                        .topics
                        .iter()
                        .map(|t| TopicOutline {
                            id: t.id.clone(),
                            title: t.title.clone(),
                            text_bytes: t.text.len(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Infer the chapter/topic structure of an extracted document.
///
/// Deterministic: the same extraction result always yields byte-identical
/// boundaries and titles.
pub fn analyze(result: &ExtractionResult) -> DocumentStructure {
    let full_text = result.full_text();
    let page_offsets = result.page_offsets();

    let input = ChapterInput {
        toc: &result.toc,
        full_text: &full_text,
        page_offsets: &page_offsets,
    };
    let segments = run_strategies(&input, &chapters::strategies())
        .expect("single-chapter tier always yields a segment");

    let mut chapters_out = Vec::with_capacity(segments.len());
    for (i, (seg, range)) in partition(full_text.len(), segments).into_iter().enumerate() {
        let id = i + 1;
        let text = full_text[range].to_string();
        let topics = identify_topics(id, &text);
        tracing::debug!(
            chapter = id,
            title = %seg.title,
            topics = topics.len(),
            bytes = text.len(),
            "chapter identified"
        );
        chapters_out.push(Chapter {
            id,
            title: seg.title,
            text,
            topics,
        });
    }

    DocumentStructure {
        chapters: chapters_out,
    }
}

/// Split one chapter's text into topics with the topic strategy tiers.
fn identify_topics(chapter_id: usize, chapter_text: &str) -> Vec<Topic> {
    let segments = run_strategies(chapter_text, topics::STRATEGIES)
        .expect("single-topic tier always yields a segment");

    partition(chapter_text.len(), segments)
        .into_iter()
        .enumerate()
        .map(|(i, (seg, range))| Topic {
            id: format!("{}.{}", chapter_id, i + 1),
            title: seg.title,
            text: chapter_text[range].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{DocMetadata, Page, TocEntry, normalize};

    fn result_with(toc: Vec<TocEntry>, page_texts: &[&str]) -> ExtractionResult {
        normalize(ExtractionResult {
            metadata: DocMetadata::default(),
            toc,
            pages: page_texts
                .iter()
                .enumerate()
                .map(|(i, text)| Page {
                    page_num: i + 1,
                    text: text.to_string(),
                    blocks: None,
                })
                .collect(),
        })
    }

    fn toc_entry(level: u32, title: &str, page: usize) -> TocEntry {
        TocEntry {
            level,
            title: title.into(),
            page,
        }
    }

    fn assert_partitions(structure: &DocumentStructure, full_text: &str) {
        let total: usize = structure.chapters.iter().map(|c| c.text.len()).sum();
        assert_eq!(total, full_text.len());
        let mut rebuilt = String::new();
        for chapter in &structure.chapters {
            rebuilt.push_str(&chapter.text);
            let topic_total: usize = chapter.topics.iter().map(|t| t.text.len()).sum();
            assert_eq!(topic_total, chapter.text.len());
            let rebuilt_chapter: String =
                chapter.topics.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(rebuilt_chapter, chapter.text);
        }
        assert_eq!(rebuilt, full_text);
    }

    #[test]
    fn toc_driven_chapters_match_entries_verbatim() {
        let toc = vec![
            toc_entry(1, "Chapter 1: Mechanics", 1),
            toc_entry(1, "Chapter 2: Waves", 3),
        ];
        let result = result_with(toc, &["page one", "page two", "page three", "page four"]);
        let structure = analyze(&result);
        assert_eq!(structure.chapters.len(), 2);
        assert_eq!(structure.chapters[0].title, "Chapter 1: Mechanics");
        assert_eq!(structure.chapters[1].title, "Chapter 2: Waves");
        assert!(structure.chapters[1].text.starts_with("page three"));
        assert_partitions(&structure, &result.full_text());
    }

    #[test]
    fn empty_toc_range_chapter_retained() {
        let toc = vec![
            toc_entry(1, "A", 1),
            toc_entry(1, "B", 1), // same page: empty-text chapter
            toc_entry(1, "C", 2),
        ];
        let result = result_with(toc, &["first", "second"]);
        let structure = analyze(&result);
        assert_eq!(structure.chapters.len(), 3);
        assert_eq!(structure.chapters[0].text, "");
        assert_eq!(structure.chapters[0].topics.len(), 1);
        assert_eq!(structure.chapters[0].topics[0].title, "Main Topic");
        assert_partitions(&structure, &result.full_text());
    }

    #[test]
    fn pattern_fallback_when_toc_empty() {
        let result = result_with(
            vec![],
            &[
                "Preamble text.\n\nChapter 1: Forces\n\nForce body.",
                "Chapter 2: Energy\n\nEnergy body.",
            ],
        );
        let structure = analyze(&result);
        assert_eq!(structure.chapters.len(), 2);
        assert_eq!(structure.chapters[0].title, "Forces");
        // Front matter joins the first chapter; nothing is lost.
        assert!(structure.chapters[0].text.starts_with("Preamble text."));
        assert_partitions(&structure, &result.full_text());
    }

    #[test]
    fn single_chapter_fallback_covers_everything() {
        let result = result_with(vec![], &["just prose here", "and more prose"]);
        let structure = analyze(&result);
        assert_eq!(structure.chapters.len(), 1);
        assert_eq!(structure.chapters[0].title, "Chapter 1");
        assert_eq!(structure.chapters[0].text, result.full_text());
        assert_eq!(structure.chapters[0].topics.len(), 1);
        assert_eq!(structure.chapters[0].topics[0].id, "1.1");
        assert_partitions(&structure, &result.full_text());
    }

    #[test]
    fn topic_ids_are_dotted_and_unique_past_ten() {
        // Periods in the headings keep them out of the capitalized-line
        // pattern, forcing the paragraph-grouping tier.
        let mut text = String::from("intro.\n\n");
        for i in 1..=12 {
            text.push_str(&format!("PART {i}.\n\nbody {i}.\n\n"));
        }
        let result = result_with(vec![], &[&text]);
        let structure = analyze(&result);
        let ids: Vec<&str> = structure.chapters[0]
            .topics
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert!(ids.contains(&"1.1"));
        assert!(ids.contains(&"1.10"));
        assert!(ids.contains(&"1.13")); // Introduction + 12 headings
        let unique: std::collections::BTreeSet<&&str> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn analysis_is_idempotent() {
        let toc = vec![toc_entry(1, "Only", 1)];
        let result = result_with(toc, &["FIRST\n\nalpha.\n\nSECOND\n\nbeta."]);
        let a = analyze(&result);
        let b = analyze(&result);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
