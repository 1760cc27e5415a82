//! The search service: lazily built index plus the query pipeline.
//!
//! [`SearchService`] owns a content source and builds its [`PostIndex`] on first use.
//! The build is single-flight: concurrent first callers wait for one build, and a failed
//! build leaves the service unbuilt so the next call retries.

use std::time::Instant;

use once_cell::sync::OnceCell;
use quill_config::{Config, SearchSettings};
use quill_document::{ContentSource, FsContentSource, extract_documents};
use tracing::{debug, error, info};

use crate::{
    IndexError,
    analyzer::segmenter_by_name,
    index::PostIndex,
    merge::merge_hits,
    result::{SearchResponse, SearchResult},
    snippet::snippet,
};

/// Query entry point over a post corpus.
pub struct SearchService {
    /// Where posts come from.
    source: Box<dyn ContentSource>,
    /// Limits, snippet radius and segmenter.
    settings: SearchSettings,
    /// The index, once built.
    index: OnceCell<PostIndex>,
}

impl SearchService {
    /// Creates a service over `source`. Nothing is read until the first query.
    pub fn new(source: impl ContentSource + 'static, settings: SearchSettings) -> Self {
        Self {
            source: Box::new(source),
            settings,
            index: OnceCell::new(),
        }
    }

    /// Creates a service over the configured posts directory.
    pub fn from_config(config: &Config) -> Self {
        let source = FsContentSource::new(&config.content.posts, &config.content.post_file);
        Self::new(source, config.search.clone())
    }

    /// Search settings in effect.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Returns true once the index has been built.
    pub fn is_built(&self) -> bool {
        self.index.get().is_some()
    }

    /// Returns the index, building it on first use.
    pub fn index(&self) -> Result<&PostIndex, IndexError> {
        self.index
            .get_or_try_init(|| self.build())
            .inspect_err(|e| error!(error = %e, "search index build failed"))
    }

    /// Forces the index build and returns the number of indexed posts.
    pub fn warm(&self) -> Result<usize, IndexError> {
        self.index().map(PostIndex::len)
    }

    /// Runs a query.
    ///
    /// The query is trimmed; an empty query returns an empty response without touching
    /// the index. `limit` is clamped to `[1, max_limit]`.
    pub fn search(&self, query: &str, limit: usize) -> Result<SearchResponse, IndexError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResponse::empty(query));
        }
        let limit = limit.clamp(1, self.max_limit());

        let index = self.index()?;
        let lists = index.search_fields(query, limit)?;
        let results: Vec<SearchResult> = merge_hits(&lists, |id| index.document(id), query, limit)
            .into_iter()
            .map(|hit| {
                let excerpt = snippet(&hit.document.body, query, self.settings.snippet_radius);
                SearchResult::new(hit.document, excerpt, hit.matched_fields)
            })
            .collect();

        debug!(query, limit, total = results.len(), "search");
        Ok(SearchResponse::new(query, results))
    }

    /// Normalizes a raw `limit` parameter.
    ///
    /// Missing, empty or non-numeric input yields the default limit; numbers are
    /// floored and clamped to `[1, max_limit]`.
    pub fn clamp_limit(&self, raw: Option<&str>) -> usize {
        let max = self.max_limit();
        let default = self.settings.default_limit.clamp(1, max);

        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return default;
        };
        let trimmed = raw.trim();
        let value = match trimmed {
            "" => 0.0,
            "Infinity" | "+Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            // `inf`, `infinity` and `NaN` are not numbers here.
            _ => match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => value.floor(),
                _ => return default,
            },
        };

        if value < 1.0 {
            1
        } else if value >= max as f64 {
            max
        } else {
            value as usize
        }
    }

    /// Upper bound for limits, never below 1.
    fn max_limit(&self) -> usize {
        self.settings.max_limit.max(1)
    }

    /// Loads the corpus and builds the index.
    fn build(&self) -> Result<PostIndex, IndexError> {
        let started = Instant::now();
        let segmenter = segmenter_by_name(&self.settings.segmenter)?;
        let posts = self.source.load()?;
        let documents = extract_documents(&posts)?;
        let index = PostIndex::build(documents, segmenter)?;
        info!(
            posts = index.len(),
            segmenter = %self.settings.segmenter,
            elapsed_ms = started.elapsed().as_millis(),
            "search index built"
        );
        Ok(index)
    }
}
