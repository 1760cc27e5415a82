//! Error types for the quill-index crate.

use quill_document::DocumentError;
use thiserror::Error;

/// Errors that can occur while building or querying the post index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The corpus could not be read or extracted.
    #[error("failed to load posts: {0}")]
    Corpus(#[from] DocumentError),

    /// Tantivy failed while building or searching the index.
    #[error("index error: {0}")]
    Tantivy(String),

    /// The configured segmenter name is not known.
    #[error("unknown segmenter: {0}")]
    UnknownSegmenter(String),
}

impl IndexError {
    /// Creates a `Tantivy` error from a Tantivy error.
    pub(crate) fn tantivy(source: &tantivy::TantivyError) -> Self {
        Self::Tantivy(source.to_string())
    }
}
