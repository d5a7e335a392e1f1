//! End-to-end pipeline: extract → infer structure → summarize → examples.
//!
//! The pipeline owns both model collaborators; they are constructed once
//! before the run and used read-only. After extraction succeeds nothing in
//! the pipeline can fail: every later stage degrades in place, so the output
//! is always complete and well-formed, however impoverished.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::example::{ExampleArtifacts, ExampleEngine};
use crate::extract::{self, ExtractionResult};
use crate::model::{GenerativeModel, SummaryModel};
use crate::structure::{self, DocumentStructure};
use crate::summarize::{Summarizer, SummaryArtifacts};

/// Pipeline tuning knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Examples requested per topic.
    pub examples_per_topic: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            examples_per_topic: 2,
        }
    }
}

/// Everything the pipeline produces for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub structure: DocumentStructure,
    pub summaries: SummaryArtifacts,
    pub examples: ExampleArtifacts,
}

pub struct Pipeline {
    summary_model: Box<dyn SummaryModel>,
    generative_model: Box<dyn GenerativeModel>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        summary_model: Box<dyn SummaryModel>,
        generative_model: Box<dyn GenerativeModel>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            summary_model,
            generative_model,
            config,
        }
    }

    /// Process a PDF file start to finish.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<PipelineOutput> {
        let extraction = extract::extract(path.as_ref())?;
        Ok(self.process(&extraction))
    }

    /// Process an uploaded byte buffer.
    ///
    /// The bytes are staged in a temp file which is removed on success and
    /// failure alike (dropping the guard unlinks it).
    pub fn run_bytes(&self, bytes: &[u8]) -> Result<PipelineOutput> {
        let mut staged = tempfile::Builder::new().suffix(".pdf").tempfile()?;
        staged.write_all(bytes)?;
        staged.flush()?;
        self.run(staged.path())
    }

    /// The infallible post-extraction stages.
    pub fn process(&self, extraction: &ExtractionResult) -> PipelineOutput {
        let structure = structure::analyze(extraction);
        tracing::info!(
            chapters = structure.chapters.len(),
            topics = structure.topics().count(),
            "structure inferred"
        );

        let summarizer = Summarizer::new(self.summary_model.as_ref());
        let mut summaries = SummaryArtifacts::default();
        for chapter in &structure.chapters {
            summaries
                .chapters
                .insert(chapter.id, summarizer.summarize_chapter(&chapter.text));
        }
        for (_, topic) in structure.topics() {
            summaries
                .topics
                .insert(topic.id.clone(), summarizer.summarize_topic(&topic.text));
        }

        let engine = ExampleEngine::new(self.generative_model.as_ref());
        let mut examples = ExampleArtifacts::new();
        for (_, topic) in structure.topics() {
            examples.insert(
                topic.id.clone(),
                engine.generate_examples(&topic.text, self.config.examples_per_topic),
            );
        }

        PipelineOutput {
            structure,
            summaries,
            examples,
        }
    }
}
