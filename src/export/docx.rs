//! Word-processor rendering through `docx-rs`.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use crate::example::ExampleArtifacts;
use crate::export::ExportError;
use crate::structure::DocumentStructure;
use crate::summarize::SummaryArtifacts;

// Run sizes are half-points.
const TITLE_SIZE: usize = 40;
const SECTION_SIZE: usize = 32;
const HEADING_SIZE: usize = 26;

fn heading(text: &str, size: usize) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).size(size).bold())
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

pub fn render_docx(
    structure: &DocumentStructure,
    summaries: &SummaryArtifacts,
    examples: &ExampleArtifacts,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = Docx::new().add_paragraph(heading("Textbook Summary", TITLE_SIZE));

    doc = doc.add_paragraph(heading("Chapter Summaries", SECTION_SIZE));
    for chapter in &structure.chapters {
        doc = doc.add_paragraph(heading(
            &format!("{}. {}", chapter.id, chapter.title),
            HEADING_SIZE,
        ));
        if let Some(summary) = summaries.chapters.get(&chapter.id) {
            // Chapter summaries may hold two paragraphs.
            for paragraph in summary.split("\n\n") {
                doc = doc.add_paragraph(body(paragraph));
            }
        }
    }

    doc = doc.add_paragraph(heading("Topic Summaries", SECTION_SIZE));
    for (_, topic) in structure.topics() {
        doc = doc.add_paragraph(heading(
            &format!("{} {}", topic.id, topic.title),
            HEADING_SIZE,
        ));
        if let Some(summary) = summaries.topics.get(&topic.id) {
            doc = doc.add_paragraph(body(summary));
        }
    }

    doc = doc.add_paragraph(heading("Examples", SECTION_SIZE));
    for (_, topic) in structure.topics() {
        let Some(topic_examples) = examples.get(&topic.id) else {
            continue;
        };
        if topic_examples.is_empty() {
            continue;
        }
        doc = doc.add_paragraph(heading(
            &format!("{} {}", topic.id, topic.title),
            HEADING_SIZE,
        ));
        for (i, example) in topic_examples.iter().enumerate() {
            doc = doc.add_paragraph(body(&format!("Example {}: {}", i + 1, example)));
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::Assembly {
            message: e.to_string(),
        })?;
    Ok(cursor.into_inner())
}
