//! Merging per-field hit lists into one ranked result list.
//!
//! A document's score in a field is `weight * 100 + max(0, 100 - rank)`. Across fields
//! the maximum score is kept and the matched fields are accumulated. Ties are broken by
//! recency, then by id. Documents that do not literally contain a query token are
//! dropped before truncation.

use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashMap},
};

use quill_document::{SearchDocument, newest_first};

use crate::{index::FieldHit, schema::SearchField};

/// A merged, scored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedHit<'a> {
    /// The matched document.
    pub document: &'a SearchDocument,
    /// Best weighted score across fields.
    pub score: u32,
    /// Fields the document matched in, highest weight first.
    pub matched_fields: Vec<SearchField>,
}

/// Weighted score of a hit at `rank` in `field`.
pub fn field_score(field: SearchField, rank: usize) -> u32 {
    let rank_bonus = 100_u32.saturating_sub(u32::try_from(rank).unwrap_or(u32::MAX));
    field.weight() * 100 + rank_bonus
}

/// Merges per-field hit lists into at most `limit` ranked documents.
///
/// `lookup` resolves ids to documents; hits whose id does not resolve are skipped.
pub fn merge_hits<'a, F>(
    lists: &[Vec<FieldHit>],
    lookup: F,
    query: &str,
    limit: usize,
) -> Vec<RankedHit<'a>>
where
    F: Fn(u64) -> Option<&'a SearchDocument>,
{
    /// Accumulated state for one document.
    struct Entry<'a> {
        /// The document.
        document: &'a SearchDocument,
        /// Best score so far.
        score: u32,
        /// Fields matched so far.
        fields: BTreeSet<SearchField>,
    }

    let mut merged: HashMap<u64, Entry<'a>> = HashMap::new();
    for hit in lists.iter().flatten() {
        let Some(document) = lookup(hit.id) else {
            continue;
        };
        let score = field_score(hit.field, hit.rank);
        let entry = merged.entry(hit.id).or_insert_with(|| Entry {
            document,
            score,
            fields: BTreeSet::new(),
        });
        entry.score = entry.score.max(score);
        entry.fields.insert(hit.field);
    }

    let mut ranked: Vec<RankedHit<'a>> = merged
        .into_values()
        .map(|entry| RankedHit {
            document: entry.document,
            score: entry.score,
            // BTreeSet order is declaration order, which is weight order.
            matched_fields: entry.fields.into_iter().collect(),
        })
        .collect();
    ranked.sort_by(compare_ranked);

    ranked
        .into_iter()
        .filter(|hit| contains_query_token(hit.document, query))
        .take(limit)
        .collect()
}

/// Orders by score descending, then most recent first, then ascending id.
fn compare_ranked(a: &RankedHit<'_>, b: &RankedHit<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| newest_first(&a.document.date, &b.document.date))
        .then_with(|| a.document.id.cmp(&b.document.id))
}

/// Checks that the title, tags or body contain at least one whitespace-separated
/// query token, ignoring case.
pub fn contains_query_token(document: &SearchDocument, query: &str) -> bool {
    let query = query.to_lowercase();
    let title = document.title.to_lowercase();
    let tags = document.tags.join(" ").to_lowercase();
    let body = document.body.to_lowercase();

    query
        .split_whitespace()
        .any(|token| title.contains(token) || tags.contains(token) || body.contains(token))
}
