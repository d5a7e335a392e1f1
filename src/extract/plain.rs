//! Plain extraction backend built on `pdf-extract`.
//!
//! `pdf-extract` returns the whole document as one string, so pages are
//! recovered from the form feed characters it inserts between pages (with a
//! triple-newline heuristic as a last resort). No TOC, no blocks; the title
//! is a best-effort first-line guess.

use std::path::Path;

use crate::extract::{DocMetadata, ExtractError, ExtractionBackend, ExtractionResult, Page};

/// Plain-text PDF backend (`pdf-extract`).
pub struct PlainBackend;

impl ExtractionBackend for PlainBackend {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract(&self, path: &Path) -> Result<ExtractionResult, ExtractError> {
        let text = pdf_extract::extract_text(path).map_err(|e| ExtractError::BackendFailure {
            backend: self.name(),
            message: e.to_string(),
        })?;

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyDocument {
                path: path.display().to_string(),
            });
        }

        // Form feeds (\x0C) separate pages in pdf-extract output. Without
        // them, fall back to triple newlines.
        let raw_pages: Vec<&str> = if text.contains('\x0C') {
            text.split('\x0C').collect()
        } else {
            text.split("\n\n\n").collect()
        };

        let pages: Vec<Page> = raw_pages
            .iter()
            .enumerate()
            .map(|(i, page)| Page {
                page_num: i + 1,
                text: page.trim_matches('\n').to_string(),
                blocks: None,
            })
            .collect();

        // Best-effort title: first short non-empty line.
        let title = text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && l.len() < 200)
            .map(str::to_string);

        Ok(ExtractionResult {
            metadata: DocMetadata {
                title,
                page_count: pages.len(),
                ..Default::default()
            },
            toc: Vec::new(),
            pages,
        })
    }
}
