//! Index schema definition for the post index.
//!
//! Defines the Tantivy schema used for posts:
//! - `id`: Document id (u64, stored, indexed, fast)
//! - `title`: Post title (forward-tokenized, resolution 9)
//! - `tags`: Tags joined by spaces (forward-tokenized, resolution 7)
//! - `body`: Sanitized body (forward-tokenized, resolution 5)
//!
//! Text fields are not stored; full documents live beside the index.

use std::fmt;

use serde::Serialize;
use tantivy::schema::{
    FAST, Field, INDEXED, IndexRecordOption, STORED, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::FORWARD_TOKENIZER;

/// One of the three searchable fields of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Post title.
    Title,
    /// Post tags.
    Tags,
    /// Post body.
    Body,
}

impl SearchField {
    /// All fields, highest weight first.
    pub const ALL: [Self; 3] = [Self::Title, Self::Tags, Self::Body];

    /// Weight applied to this field when merging hits.
    pub fn weight(self) -> u32 {
        match self {
            Self::Title => 3,
            Self::Tags => 2,
            Self::Body => 1,
        }
    }

    /// Number of score buckets used for ranking within this field.
    pub fn resolution(self) -> u32 {
        match self {
            Self::Title => 9,
            Self::Tags => 7,
            Self::Body => 5,
        }
    }

    /// Field name as used in the schema and in results.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Tags => "tags",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handles to all fields in the index schema.
#[derive(Debug, Clone)]
pub struct IndexSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Document id.
    pub id: Field,
    /// Post title.
    pub title: Field,
    /// Post tags.
    pub tags: Field,
    /// Sanitized post body.
    pub body: Field,
}

impl IndexSchema {
    /// Creates a new index schema with all fields configured.
    pub fn new() -> Self {
        let mut builder = Schema::builder();

        let id = builder.add_u64_field("id", STORED | INDEXED | FAST);

        let text_options = TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(FORWARD_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        );
        let title = builder.add_text_field(SearchField::Title.as_str(), text_options.clone());
        let tags = builder.add_text_field(SearchField::Tags.as_str(), text_options.clone());
        let body = builder.add_text_field(SearchField::Body.as_str(), text_options);

        let schema = builder.build();

        Self {
            schema,
            id,
            title,
            tags,
            body,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Tantivy field handle for a searchable field.
    pub fn field(&self, field: SearchField) -> Field {
        match field {
            SearchField::Title => self.title,
            SearchField::Tags => self.tags,
            SearchField::Body => self.body,
        }
    }
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}
