//! Extraction adapter: two PDF backends, one canonical shape.
//!
//! The rich backend (`lopdf`) yields per-page text, Info-dictionary
//! metadata, and an outline-derived table of contents. The plain backend
//! (`pdf-extract`) yields pages only. The adapter tries rich first, falls
//! back to plain on any failure, and normalizes whichever result it gets:
//! pages sorted and contiguous from 1 with gaps filled by empty pages,
//! `page_count == pages.len()`, TOC pages clamped into range.
//!
//! Backend identity never leaks past this module.

pub mod plain;
pub mod rich;

use std::path::Path;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Errors from the extraction adapter.
#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    #[error("both extraction backends failed for \"{path}\"")]
    #[diagnostic(
        code(sebayt::extract::both_backends_failed),
        help(
            "Neither the rich (lopdf) nor the plain (pdf-extract) backend could \
             read this file. Verify it is a valid, unencrypted PDF.\n\
             rich backend: {rich}\n\
             plain backend: {plain}"
        )
    )]
    BothBackendsFailed {
        path: String,
        rich: String,
        plain: String,
    },

    #[error("{backend} backend failed: {message}")]
    #[diagnostic(
        code(sebayt::extract::backend_failure),
        help("The backend could not open or parse the file.")
    )]
    BackendFailure {
        backend: &'static str,
        message: String,
    },

    #[error("empty document: no text extracted from \"{path}\"")]
    #[diagnostic(
        code(sebayt::extract::empty_document),
        help(
            "The backend opened the file but extracted no text. The PDF may be \
             scanned images without a text layer."
        )
    )]
    EmptyDocument { path: String },
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
    /// Authoritative upper bound for all page references.
    pub page_count: usize,
}

/// One table-of-contents entry. `page` is 1-indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u32,
    pub title: String,
    pub page: usize,
}

/// A text block within a page. Font annotations are best-effort and may be
/// absent entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub text: String,
    pub font_size: Option<f32>,
    pub font_name: Option<String>,
}

/// One page of extracted text. `page_num` is 1-indexed and contiguous after
/// normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub page_num: usize,
    pub text: String,
    pub blocks: Option<Vec<Block>>,
}

/// Canonical extraction result. Built once per document, read-only after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub metadata: DocMetadata,
    pub toc: Vec<TocEntry>,
    pub pages: Vec<Page>,
}

impl ExtractionResult {
    /// Concatenate all page text, joined by blank lines.
    ///
    /// This is the text the structure engine partitions; its page offsets
    /// must stay in sync with `page_offsets`.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            out.push_str(&page.text);
        }
        out
    }

    /// Byte offset of each page's text within `full_text()`.
    pub fn page_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.pages.len());
        let mut pos = 0usize;
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                pos += 2; // the "\n\n" joiner
            }
            offsets.push(pos);
            pos += page.text.len();
        }
        offsets
    }
}

/// A PDF extraction backend mapping into the canonical shape.
pub trait ExtractionBackend {
    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// Extract pages, metadata, and (if available) a table of contents.
    fn extract(&self, path: &Path) -> Result<ExtractionResult, ExtractError>;
}

/// Extract a PDF with rich-first/plain-fallback policy and normalize.
pub fn extract(path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractError> {
    let path = path.as_ref();
    let rich = rich::RichBackend;
    let plain = plain::PlainBackend;

    let result = match rich.extract(path) {
        Ok(result) => result,
        Err(rich_err) => {
            tracing::warn!(
                backend = rich.name(),
                error = %rich_err,
                "rich extraction failed, falling back to plain backend"
            );
            match plain.extract(path) {
                Ok(result) => result,
                Err(plain_err) => {
                    return Err(ExtractError::BothBackendsFailed {
                        path: path.display().to_string(),
                        rich: rich_err.to_string(),
                        plain: plain_err.to_string(),
                    });
                }
            }
        }
    };

    Ok(normalize(result))
}

/// Enforce the adapter guarantees on a raw backend result.
///
/// Pages are sorted by `page_num`, duplicates dropped (first wins), gaps
/// filled with synthesized empty pages, and text NFC-normalized. The result
/// always has at least one page and `page_count == pages.len()`.
pub fn normalize(mut result: ExtractionResult) -> ExtractionResult {
    // Page numbers are 1-indexed; a stray page 0 would otherwise stall the
    // fill loop and shadow every real page with a synthesized empty one.
    result.pages.retain(|p| p.page_num >= 1);
    result.pages.sort_by_key(|p| p.page_num);
    result.pages.dedup_by_key(|p| p.page_num);

    let max_page = result.pages.last().map(|p| p.page_num).unwrap_or(0).max(1);
    let mut pages = Vec::with_capacity(max_page);
    let mut iter = result.pages.into_iter().peekable();
    for page_num in 1..=max_page {
        match iter.peek() {
            Some(p) if p.page_num == page_num => {
                let mut page = iter.next().expect("peeked page");
                page.text = page.text.nfc().collect();
                pages.push(page);
            }
            _ => pages.push(Page {
                page_num,
                text: String::new(),
                blocks: None,
            }),
        }
    }
    result.pages = pages;
    result.metadata.page_count = result.pages.len();

    for entry in &mut result.toc {
        entry.page = entry.page.clamp(1, result.metadata.page_count);
        entry.level = entry.level.max(1);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize, text: &str) -> Page {
        Page {
            page_num: n,
            text: text.into(),
            blocks: None,
        }
    }

    #[test]
    fn normalize_sorts_and_fills_gaps() {
        let raw = ExtractionResult {
            metadata: DocMetadata::default(),
            toc: vec![],
            pages: vec![page(3, "three"), page(1, "one")],
        };
        let result = normalize(raw);
        assert_eq!(result.metadata.page_count, 3);
        assert_eq!(result.pages.len(), 3);
        assert_eq!(result.pages[0].text, "one");
        assert_eq!(result.pages[1].page_num, 2);
        assert_eq!(result.pages[1].text, "");
        assert_eq!(result.pages[2].text, "three");
    }

    #[test]
    fn normalize_drops_page_zero_and_keeps_real_pages() {
        let raw = ExtractionResult {
            metadata: DocMetadata::default(),
            toc: vec![],
            pages: vec![page(0, "front matter"), page(1, "alpha"), page(2, "beta")],
        };
        let result = normalize(raw);
        assert_eq!(result.metadata.page_count, 2);
        assert_eq!(result.pages[0].text, "alpha");
        assert_eq!(result.pages[1].text, "beta");
    }

    #[test]
    fn normalize_guarantees_at_least_one_page() {
        let raw = ExtractionResult {
            metadata: DocMetadata::default(),
            toc: vec![],
            pages: vec![],
        };
        let result = normalize(raw);
        assert_eq!(result.metadata.page_count, 1);
        assert_eq!(result.pages[0].text, "");
    }

    #[test]
    fn normalize_clamps_toc_pages() {
        let raw = ExtractionResult {
            metadata: DocMetadata::default(),
            toc: vec![
                TocEntry {
                    level: 1,
                    title: "Over".into(),
                    page: 99,
                },
                TocEntry {
                    level: 0,
                    title: "Under".into(),
                    page: 0,
                },
            ],
            pages: vec![page(1, "a"), page(2, "b")],
        };
        let result = normalize(raw);
        assert_eq!(result.toc[0].page, 2);
        assert_eq!(result.toc[1].page, 1);
        assert_eq!(result.toc[1].level, 1);
    }

    #[test]
    fn full_text_and_offsets_agree() {
        let result = normalize(ExtractionResult {
            metadata: DocMetadata::default(),
            toc: vec![],
            pages: vec![page(1, "alpha"), page(2, "beta"), page(3, "gamma")],
        });
        let full = result.full_text();
        assert_eq!(full, "alpha\n\nbeta\n\ngamma");
        let offsets = result.page_offsets();
        assert_eq!(offsets, vec![0, 7, 13]);
        assert_eq!(&full[offsets[1]..offsets[1] + 4], "beta");
        assert_eq!(&full[offsets[2]..], "gamma");
    }
}
