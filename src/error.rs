//! Rich diagnostic error types for the sebayt pipeline.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text. The top-level `SebaytError`
//! wraps them transparently so the full diagnostic chain reaches the user.

use miette::Diagnostic;
use thiserror::Error;

pub use crate::export::ExportError;
pub use crate::extract::ExtractError;
pub use crate::model::ModelError;

/// Top-level error type for the sebayt pipeline.
///
/// Only extraction failures, model construction failures, and export
/// failures are terminal; everything inside the pipeline degrades in place
/// (structure inference falls through its tiers, chunk summarization and
/// example generation recover locally).
#[derive(Debug, Error, Diagnostic)]
pub enum SebaytError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),

    #[error("I/O error: {source}")]
    #[diagnostic(
        code(sebayt::io),
        help("A filesystem operation failed. Check file paths and permissions.")
    )]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Convenience alias for pipeline results.
pub type Result<T> = std::result::Result<T, SebaytError>;
