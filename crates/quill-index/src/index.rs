//! The in-memory post index.
//!
//! [`PostIndex`] owns a RAM-backed Tantivy index over the three searchable fields and
//! the complete [`SearchDocument`] records, which are resolved by id at query time.

use std::{cmp::Ordering, collections::HashMap, fmt, sync::Arc};

use quill_document::SearchDocument;
use tantivy::{
    Index, IndexReader, IndexWriter, ReloadPolicy, Score, TantivyDocument, Term,
    collector::TopDocs,
    query::{BooleanQuery, Occur, Query, TermQuery},
    schema::{IndexRecordOption, Value},
    tokenizer::TextAnalyzer,
};
use tracing::debug;

use crate::{
    IndexError,
    analyzer::{FORWARD_TOKENIZER, ForwardTokenizer, Segmenter, query_terms},
    schema::{IndexSchema, SearchField},
};

/// Heap size for the index writer (50 MB).
const WRITER_HEAP_SIZE: usize = 50_000_000;

/// One document matched in one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHit {
    /// Field the document matched in.
    pub field: SearchField,
    /// Zero-based position within the field's ranked list.
    pub rank: usize,
    /// Matched document id.
    pub id: u64,
}

/// A built, read-only index over a post corpus.
pub struct PostIndex {
    /// Field handles.
    schema: IndexSchema,
    /// Searcher source.
    reader: IndexReader,
    /// Segmentation used for both indexing and queries.
    segmenter: Arc<dyn Segmenter>,
    /// Complete documents in corpus order.
    documents: Vec<SearchDocument>,
    /// Position in `documents` by id.
    positions: HashMap<u64, usize>,
}

impl fmt::Debug for PostIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostIndex")
            .field("segmenter", &self.segmenter)
            .field("documents", &self.documents.len())
            .finish_non_exhaustive()
    }
}

impl PostIndex {
    /// Builds an index over `documents`.
    ///
    /// An empty corpus yields an empty, queryable index.
    pub fn build(
        documents: Vec<SearchDocument>,
        segmenter: Arc<dyn Segmenter>,
    ) -> Result<Self, IndexError> {
        let schema = IndexSchema::new();
        let index = Index::create_in_ram(schema.schema().clone());
        index.tokenizers().register(
            FORWARD_TOKENIZER,
            TextAnalyzer::builder(ForwardTokenizer::new(Arc::clone(&segmenter))).build(),
        );

        let mut writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_HEAP_SIZE)
            .map_err(|e| IndexError::tantivy(&e))?;
        for doc in &documents {
            let mut tantivy_doc = TantivyDocument::new();
            tantivy_doc.add_u64(schema.id, doc.id);
            tantivy_doc.add_text(schema.title, &doc.title);
            tantivy_doc.add_text(schema.tags, doc.tags.join(" "));
            tantivy_doc.add_text(schema.body, &doc.body);
            writer
                .add_document(tantivy_doc)
                .map_err(|e| IndexError::tantivy(&e))?;
        }
        writer.commit().map_err(|e| IndexError::tantivy(&e))?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| IndexError::tantivy(&e))?;

        let positions = documents
            .iter()
            .enumerate()
            .map(|(pos, doc)| (doc.id, pos))
            .collect();

        debug!(documents = documents.len(), "built post index");
        Ok(Self {
            schema,
            reader,
            segmenter,
            documents,
            positions,
        })
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// All documents in corpus order.
    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }

    /// Looks up a document by id.
    pub fn document(&self, id: u64) -> Option<&SearchDocument> {
        self.positions.get(&id).map(|&pos| &self.documents[pos])
    }

    /// Segmenter used by this index.
    pub fn segmenter(&self) -> &dyn Segmenter {
        &*self.segmenter
    }

    /// Runs `query` against every field and returns each field's ranked hits.
    ///
    /// Lists are in field order (title, tags, body) and each holds at most `limit` hits.
    pub fn search_fields(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Vec<FieldHit>>, IndexError> {
        SearchField::ALL
            .iter()
            .map(|&field| self.search_field(field, query, limit))
            .collect()
    }

    /// Runs `query` against one field.
    ///
    /// Every query term must prefix-match a word in the field. Matches are ranked by
    /// score bucket (the field's resolution splits the range up to the best score), then
    /// by ascending id.
    pub fn search_field(
        &self,
        field: SearchField,
        query: &str,
        limit: usize,
    ) -> Result<Vec<FieldHit>, IndexError> {
        let terms = query_terms(&*self.segmenter, query);
        if terms.is_empty() || limit == 0 || self.documents.is_empty() {
            return Ok(Vec::new());
        }

        let tantivy_field = self.schema.field(field);
        let clauses: Vec<(Occur, Box<dyn Query>)> = terms
            .iter()
            .map(|term| {
                let query: Box<dyn Query> = Box::new(TermQuery::new(
                    Term::from_field_text(tantivy_field, term),
                    IndexRecordOption::WithFreqs,
                ));
                (Occur::Must, query)
            })
            .collect();
        let query = BooleanQuery::new(clauses);

        let searcher = self.reader.searcher();
        let top_docs = searcher
            .search(&query, &TopDocs::with_limit(self.documents.len()))
            .map_err(|e| IndexError::tantivy(&e))?;

        let mut scored = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| IndexError::tantivy(&e))?;
            if let Some(id) = doc.get_first(self.schema.id).and_then(|v| v.as_u64()) {
                scored.push((score, id));
            }
        }

        Ok(rank_by_resolution(scored, field.resolution())
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(rank, id)| FieldHit { field, rank, id })
            .collect())
    }
}

/// Orders scored ids by resolution bucket (best first), then by ascending id.
fn rank_by_resolution(scored: Vec<(Score, u64)>, resolution: u32) -> Vec<u64> {
    let top = scored.iter().map(|(score, _)| *score).fold(0.0_f32, f32::max);
    let mut bucketed: Vec<(u32, u64)> = scored
        .into_iter()
        .map(|(score, id)| (bucket(score, top, resolution), id))
        .collect();
    bucketed.sort_by(|a, b| match b.0.cmp(&a.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        other => other,
    });
    bucketed.into_iter().map(|(_, id)| id).collect()
}

/// Quantizes a score into `1..=resolution` relative to the best score.
fn bucket(score: Score, top: Score, resolution: u32) -> u32 {
    if top <= 0.0 || !score.is_finite() {
        return resolution;
    }
    let bucket = (score / top * resolution as f32).ceil() as u32;
    bucket.clamp(1, resolution)
}
