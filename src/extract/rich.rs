//! Rich extraction backend built on `lopdf`.
//!
//! Yields per-page text, Info-dictionary metadata, paragraph blocks, and a
//! table of contents walked out of the document outline tree. Outline
//! destinations that cannot be resolved to a page (named destinations,
//! dangling references) are skipped rather than failing the backend.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::extract::{
    Block, DocMetadata, ExtractError, ExtractionBackend, ExtractionResult, Page, TocEntry,
};

/// Hard cap on outline entries, guarding against malformed outline graphs.
const MAX_OUTLINE_ENTRIES: usize = 4096;

/// Rich PDF backend (`lopdf`).
pub struct RichBackend;

impl ExtractionBackend for RichBackend {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract(&self, path: &Path) -> Result<ExtractionResult, ExtractError> {
        let doc = Document::load(path).map_err(|e| ExtractError::BackendFailure {
            backend: self.name(),
            message: e.to_string(),
        })?;

        let page_map = doc.get_pages();
        let mut pages = Vec::with_capacity(page_map.len());
        let mut any_text = false;

        for (&page_num, _) in &page_map {
            // A single unreadable page degrades to empty text; the adapter
            // keeps the page so numbering stays contiguous.
            let text = doc.extract_text(&[page_num]).unwrap_or_default();
            if !text.trim().is_empty() {
                any_text = true;
            }
            let blocks = paragraph_blocks(&text);
            pages.push(Page {
                page_num: page_num as usize,
                text,
                blocks: if blocks.is_empty() {
                    None
                } else {
                    Some(blocks)
                },
            });
        }

        if !any_text {
            return Err(ExtractError::EmptyDocument {
                path: path.display().to_string(),
            });
        }

        let metadata = extract_metadata(&doc, page_map.len());
        let toc = extract_toc(&doc, &page_map);

        Ok(ExtractionResult {
            metadata,
            toc,
            pages,
        })
    }
}

/// Split page text into trimmed, non-empty paragraph blocks.
///
/// `lopdf` exposes no font runs through text extraction, so the font
/// annotations stay empty; downstream consumers treat them as optional.
fn paragraph_blocks(text: &str) -> Vec<Block> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| Block {
            text: p.to_string(),
            font_size: None,
            font_name: None,
        })
        .collect()
}

fn extract_metadata(doc: &Document, page_count: usize) -> DocMetadata {
    let mut metadata = DocMetadata {
        page_count,
        ..Default::default()
    };

    let info = doc
        .trailer
        .get(b"Info")
        .ok()
        .and_then(|obj| resolve(doc, obj).as_dict().ok());

    if let Some(info) = info {
        metadata.title = string_field(info, b"Title");
        metadata.author = string_field(info, b"Author");
        metadata.subject = string_field(info, b"Subject");
        if let Some(keywords) = string_field(info, b"Keywords") {
            metadata.keywords = keywords
                .split([',', ';'])
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    metadata
}

fn string_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
    let value = dict.get(key).ok()?.as_str().ok()?;
    let decoded = decode_pdf_string(value);
    let trimmed = decoded.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Decode a PDF text string: UTF-16BE when BOM-prefixed, Latin-1 otherwise.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Walk the outline tree into a flat, document-ordered TOC.
fn extract_toc(
    doc: &Document,
    page_map: &std::collections::BTreeMap<u32, ObjectId>,
) -> Vec<TocEntry> {
    // Invert the page map so destinations can be resolved to page numbers.
    let page_numbers: HashMap<ObjectId, usize> = page_map
        .iter()
        .map(|(&num, &id)| (id, num as usize))
        .collect();

    let first = doc
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"Outlines").ok())
        .and_then(|obj| resolve(doc, obj).as_dict().ok())
        .and_then(|outlines| outlines.get(b"First").ok())
        .and_then(|obj| obj.as_reference().ok());

    let mut entries = Vec::new();
    if let Some(first) = first {
        let mut visited = HashSet::new();
        walk_outline(doc, first, 1, &page_numbers, &mut entries, &mut visited);
    }
    entries
}

fn walk_outline(
    doc: &Document,
    node_id: ObjectId,
    level: u32,
    page_numbers: &HashMap<ObjectId, usize>,
    entries: &mut Vec<TocEntry>,
    visited: &mut HashSet<ObjectId>,
) {
    let mut current = Some(node_id);
    while let Some(id) = current {
        if !visited.insert(id) || entries.len() >= MAX_OUTLINE_ENTRIES {
            return;
        }
        let Ok(dict) = doc.get_dictionary(id) else {
            return;
        };

        let title = dict
            .get(b"Title")
            .ok()
            .and_then(|obj| resolve(doc, obj).as_str().ok())
            .map(decode_pdf_string)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if !title.is_empty() {
            if let Some(page) = resolve_dest_page(doc, dict, page_numbers) {
                entries.push(TocEntry { level, title, page });
            }
        }

        if let Some(child) = dict
            .get(b"First")
            .ok()
            .and_then(|obj| obj.as_reference().ok())
        {
            walk_outline(doc, child, level + 1, page_numbers, entries, visited);
        }

        current = dict
            .get(b"Next")
            .ok()
            .and_then(|obj| obj.as_reference().ok());
    }
}

/// Resolve an outline node's destination to a 1-indexed page number.
///
/// Handles direct `/Dest` arrays and `/A` GoTo actions with an array `/D`.
/// Named destinations are skipped.
fn resolve_dest_page(
    doc: &Document,
    dict: &Dictionary,
    page_numbers: &HashMap<ObjectId, usize>,
) -> Option<usize> {
    let dest = match dict.get(b"Dest") {
        Ok(obj) => resolve(doc, obj),
        Err(_) => {
            let action = resolve(doc, dict.get(b"A").ok()?).as_dict().ok()?;
            resolve(doc, action.get(b"D").ok()?)
        }
    };

    let array = dest.as_array().ok()?;
    let page_ref = array.first()?.as_reference().ok()?;
    page_numbers.get(&page_ref).copied()
}

/// Follow one level of indirection; broken references stay as-is.
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_latin1() {
        assert_eq!(decode_pdf_string(b"Ch\xe9mie"), "Chémie");
    }

    #[test]
    fn decode_utf16be() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
    }

    #[test]
    fn paragraph_blocks_skip_empties() {
        let blocks = paragraph_blocks("First para.\n\n\n\n  Second para.  \n\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "First para.");
        assert_eq!(blocks[1].text, "Second para.");
        assert!(blocks[0].font_size.is_none());
    }

    #[test]
    fn non_pdf_bytes_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not.pdf");
        std::fs::write(&path, b"plain text, not a pdf").unwrap();
        let result = RichBackend.extract(&path);
        assert!(result.is_err());
    }
}
