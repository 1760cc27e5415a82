//! Post extraction for quill.
//!
//! This crate turns raw blog posts into normalized [`SearchDocument`]s:
//! - YAML front matter extraction (title, description, date, tags)
//! - Markdown reduction to plain text for indexing and snippets
//! - Reading time estimation
//! - Corpus traversal over a content store ([`ContentSource`])

#![warn(missing_docs)]

mod date;
mod error;
mod frontmatter;
mod sanitize;
mod source;

use serde::Serialize;
use tracing::debug;

pub use date::{newest_first, parse_post_date};
pub use error::DocumentError;
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use sanitize::{min_read, sanitize_body};
pub use source::{ContentSource, FsContentSource, MemoryContentSource, RawPost};

/// A post normalized for search.
///
/// Metadata is passed through from front matter; `body` is sanitized plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocument {
    /// Identifier unique within one corpus load, assigned in traversal order.
    pub id: u64,
    /// Post title, empty when front matter has none.
    pub title: String,
    /// Post description, empty when absent.
    pub description: String,
    /// Category the post belongs to.
    pub category: String,
    /// Slug of the post within its category.
    pub slug: String,
    /// Publication date as written in front matter, empty when absent.
    pub date: String,
    /// Estimated reading time in minutes, at least 1.
    pub min_read: u32,
    /// Tags in source order.
    pub tags: Vec<String>,
    /// Sanitized body text.
    pub body: String,
}

/// Extracts one search document from a raw post.
pub fn extract(id: u64, post: &RawPost) -> Result<SearchDocument, DocumentError> {
    let (frontmatter, body) =
        parse_frontmatter(&post.source).map_err(|e| DocumentError::Frontmatter {
            origin: post.origin(),
            message: e.to_string(),
        })?;
    let frontmatter = frontmatter.unwrap_or_default();
    debug!(id, origin = %post.origin(), "extracted post");

    Ok(SearchDocument {
        id,
        title: frontmatter.title.unwrap_or_default(),
        description: frontmatter.description.unwrap_or_default(),
        category: post.category.clone(),
        slug: post.slug.clone(),
        date: frontmatter.date.unwrap_or_default(),
        min_read: min_read(body),
        tags: frontmatter.tags,
        body: sanitize_body(body),
    })
}

/// Extracts every post of a corpus, assigning ids `1..=n` in corpus order.
///
/// The first failing post aborts extraction; no partial corpus is returned.
pub fn extract_documents(posts: &[RawPost]) -> Result<Vec<SearchDocument>, DocumentError> {
    (1..)
        .zip(posts)
        .map(|(id, post)| extract(id, post))
        .collect()
}
