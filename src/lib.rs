//! # sebayt
//!
//! Textbook PDF distillation: structure inference, hierarchical
//! summarization, and example harvesting/generation.
//!
//! ## Architecture
//!
//! - **Extraction adapter** (`extract`): two interchangeable PDF backends
//!   (`lopdf` rich, `pdf-extract` plain) normalized into one canonical shape
//! - **Structure inference** (`structure`): TOC / heading-pattern / fallback
//!   tiers reconstruct a chapter→topic tree whose text spans partition the
//!   document
//! - **Summarization** (`summarize`): sentence-bounded chunking, per-chunk
//!   model calls, salience-ranked sentence selection
//! - **Examples** (`example`): literal example harvesting with generative
//!   backfill
//! - **Export** (`export`): text, markdown, docx, and slide-deck renderers
//!
//! ## Library usage
//!
//! ```no_run
//! use sebayt::model::ExtractiveModel;
//! use sebayt::pipeline::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(
//!     Box::new(ExtractiveModel::default()),
//!     Box::new(ExtractiveModel::default()),
//!     PipelineConfig::default(),
//! );
//! let output = pipeline.run("textbook.pdf").unwrap();
//! for chapter in &output.structure.chapters {
//!     println!("{}: {}", chapter.id, chapter.title);
//! }
//! ```

pub mod error;
pub mod example;
pub mod export;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod structure;
pub mod summarize;
pub mod text;
