//! In-memory post index and search service for quill.
//!
//! This crate provides the search core:
//! - Pluggable text segmentation with Latin and CJK strategies
//! - A RAM-backed Tantivy index with forward (prefix) tokenization per field
//! - Per-field ranked retrieval with field-specific resolution
//! - Weighted merging, verification and snippet extraction
//! - [`SearchService`], a lazily built, single-flight owner of the index
//!
//! # Example
//!
//! ```
//! use quill_config::SearchSettings;
//! use quill_document::{MemoryContentSource, RawPost};
//! use quill_index::SearchService;
//!
//! let source = MemoryContentSource::new(vec![RawPost::new(
//!     "frontend",
//!     "react-hooks",
//!     "---\ntitle: Learning React Hooks\ntags: [react]\n---\nHooks hold state.",
//! )]);
//! let service = SearchService::new(source, SearchSettings::default());
//!
//! let response = service.search("rea", 20).unwrap();
//! assert_eq!(response.total, 1);
//! assert_eq!(response.results[0].slug, "react-hooks");
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod index;
mod merge;
mod result;
mod schema;
mod service;
mod snippet;

pub use analyzer::{
    CjkSegmenter, FORWARD_TOKENIZER, ForwardTokenizer, LatinSegmenter, MAX_TOKEN_LENGTH,
    MixedSegmenter, Segment, Segmenter, query_terms, segmenter_by_name,
};
pub use error::IndexError;
pub use index::{FieldHit, PostIndex};
pub use merge::{RankedHit, contains_query_token, field_score, merge_hits};
pub use result::{SearchResponse, SearchResult};
pub use schema::{IndexSchema, SearchField};
pub use service::SearchService;
pub use snippet::snippet;
