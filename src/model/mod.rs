//! Model collaborators: summarization and example generation.
//!
//! The pipeline only sees the two traits. `OllamaModel` implements both over
//! the local Ollama REST API (synchronous `ureq`, per-request timeout);
//! `ExtractiveModel` is a deterministic offline stand-in used by `--no-llm`
//! and in tests. Models are constructed once, before the pipeline runs, and
//! used read-only afterwards; construction failure is the only terminal
//! model error.

use miette::Diagnostic;
use thiserror::Error;

use crate::text;

/// Errors from model inference calls.
#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("model server is not available at {url}")]
    #[diagnostic(
        code(sebayt::model::unavailable),
        help("Start Ollama with `ollama serve`, or pass --no-llm for extractive-only output.")
    )]
    Unavailable { url: String },

    #[error("model request failed: {message}")]
    #[diagnostic(
        code(sebayt::model::request_failed),
        help("Check that the model server is running and the model is pulled.")
    )]
    RequestFailed { message: String },

    #[error("failed to parse model response: {message}")]
    #[diagnostic(
        code(sebayt::model::parse_error),
        help("The model returned an unexpected response format.")
    )]
    ParseError { message: String },

    #[error("generation is disabled for this model")]
    #[diagnostic(
        code(sebayt::model::disabled),
        help("The extractive model cannot synthesize examples; run with an LLM backend.")
    )]
    Disabled,
}

/// Abstractive summarization collaborator.
///
/// `max_len`/`min_len` are approximate token ceilings/floors for the
/// summary. Failures are absorbed by the orchestrator, which substitutes a
/// leading-sentence fallback per chunk.
pub trait SummaryModel {
    fn summarize(&self, chunk: &str, max_len: usize, min_len: usize)
    -> Result<String, ModelError>;
}

/// Generative collaborator for example synthesis.
pub trait GenerativeModel {
    fn generate(&self, prompt: &str, max_len: usize) -> Result<String, ModelError>;
}

/// Configuration for the Ollama-backed model.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL for the Ollama API.
    pub base_url: String,
    /// Model name to use.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".into(),
            model: "llama3.2".into(),
            timeout_secs: 120,
        }
    }
}

/// Ollama REST client implementing both model traits.
#[derive(Debug, Clone)]
pub struct OllamaModel {
    config: OllamaConfig,
}

impl OllamaModel {
    /// Connect to the Ollama server, probing `/api/tags`.
    ///
    /// An unreachable server fails here, terminally, rather than once per
    /// span deep inside the pipeline.
    pub fn connect(config: OllamaConfig) -> Result<Self, ModelError> {
        let url = format!("{}/api/tags", config.base_url);
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(5))
            .build();

        match agent.get(&url).call() {
            Ok(resp) if resp.status() == 200 => Ok(Self { config }),
            Ok(resp) => Err(ModelError::Unavailable {
                url: format!("{} (status {})", config.base_url, resp.status()),
            }),
            Err(_) => Err(ModelError::Unavailable {
                url: config.base_url.clone(),
            }),
        }
    }

    /// One `/api/generate` round trip with the given sampling options.
    fn request(
        &self,
        prompt: &str,
        system: &str,
        num_predict: usize,
        temperature: f64,
        top_p: f64,
    ) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .build();

        let body = serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "system": system,
            "stream": false,
            "options": {
                "num_predict": num_predict,
                "temperature": temperature,
                "top_p": top_p,
            },
        });

        let body_str = serde_json::to_string(&body).map_err(|e| ModelError::RequestFailed {
            message: format!("JSON serialize error: {e}"),
        })?;

        let resp = agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_string(&body_str)
            .map_err(|e: ureq::Error| ModelError::RequestFailed {
                message: e.to_string(),
            })?;

        let resp_str = resp.into_string().map_err(|e| ModelError::ParseError {
            message: e.to_string(),
        })?;

        let json: serde_json::Value =
            serde_json::from_str(&resp_str).map_err(|e| ModelError::ParseError {
                message: e.to_string(),
            })?;

        json["response"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| ModelError::ParseError {
                message: "missing 'response' field".into(),
            })
    }
}

impl SummaryModel for OllamaModel {
    fn summarize(
        &self,
        chunk: &str,
        max_len: usize,
        min_len: usize,
    ) -> Result<String, ModelError> {
        let system = "You summarize textbook passages. Reply with the summary only, \
                      no preamble, no bullet points.";
        let prompt = format!(
            "Summarize the following passage in roughly {min_len} to {max_len} words:\n\n{chunk}"
        );
        self.request(&prompt, system, max_len, 0.0, 1.0)
    }
}

impl GenerativeModel for OllamaModel {
    fn generate(&self, prompt: &str, max_len: usize) -> Result<String, ModelError> {
        let system = "You write short, concrete worked examples for textbook topics. \
                      Reply with the example only.";
        self.request(prompt, system, max_len, 0.7, 0.9)
    }
}

/// Deterministic offline model: summaries are the leading sentences of the
/// chunk within the word ceiling; generation is disabled so example
/// harvesting degrades to extraction plus placeholders.
#[derive(Debug, Clone, Default)]
pub struct ExtractiveModel;

impl SummaryModel for ExtractiveModel {
    fn summarize(
        &self,
        chunk: &str,
        max_len: usize,
        _min_len: usize,
    ) -> Result<String, ModelError> {
        let mut out = String::new();
        let mut words = 0usize;
        for sentence in text::split_sentences(chunk) {
            let w = text::word_count(&sentence);
            if words + w > max_len && !out.is_empty() {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&sentence);
            words += w;
        }
        Ok(out)
    }
}

impl GenerativeModel for ExtractiveModel {
    fn generate(&self, _prompt: &str, _max_len: usize) -> Result<String, ModelError> {
        Err(ModelError::Disabled)
    }
}
