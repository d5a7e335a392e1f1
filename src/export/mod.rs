//! Export renderers.
//!
//! Every format walks the structure in the same order: chapter summaries,
//! then topic summaries, then examples. Markdown is the canonical rendering;
//! plain text is markdown with heading and emphasis markers stripped, and
//! the slide deck is Marp-flavored markdown. Docx goes through `docx-rs`.

pub mod docx;
pub mod markdown;
pub mod slides;
pub mod text;

use std::fmt;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

use crate::example::ExampleArtifacts;
use crate::structure::DocumentStructure;
use crate::summarize::SummaryArtifacts;

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("unknown export format: {value}")]
    #[diagnostic(
        code(sebayt::export::unknown_format),
        help("Valid formats are text, markdown, docx, and slides.")
    )]
    UnknownFormat { value: String },

    #[error("failed to assemble export document: {message}")]
    #[diagnostic(code(sebayt::export::assembly))]
    Assembly { message: String },
}

/// Output formats for the rendered study document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
    Docx,
    Slides,
}

impl ExportFormat {
    /// Conventional file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Docx => "docx",
            ExportFormat::Slides => "md",
        }
    }

    /// Whether the rendered bytes are a binary container rather than UTF-8.
    pub fn is_binary(&self) -> bool {
        matches!(self, ExportFormat::Docx)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Docx => "docx",
            ExportFormat::Slides => "slides",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "docx" => Ok(ExportFormat::Docx),
            "slides" => Ok(ExportFormat::Slides),
            other => Err(ExportError::UnknownFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// Render the full artifact set in the requested format.
pub fn render(
    format: ExportFormat,
    structure: &DocumentStructure,
    summaries: &SummaryArtifacts,
    examples: &ExampleArtifacts,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Text => Ok(text::strip_markdown(&markdown::render_markdown(
            structure, summaries, examples,
        ))
        .into_bytes()),
        ExportFormat::Markdown => {
            Ok(markdown::render_markdown(structure, summaries, examples).into_bytes())
        }
        ExportFormat::Docx => docx::render_docx(structure, summaries, examples),
        ExportFormat::Slides => {
            Ok(slides::render_slides(structure, summaries, examples).into_bytes())
        }
    }
}
