//! Search result types returned to callers.

use quill_document::SearchDocument;
use serde::Serialize;

use crate::schema::SearchField;

/// One ranked post in a search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Document id.
    pub id: u64,
    /// Post title.
    pub title: String,
    /// Post description.
    pub description: String,
    /// Post category.
    pub category: String,
    /// Post slug.
    pub slug: String,
    /// Publication date as written.
    pub date: String,
    /// Estimated reading time in minutes.
    pub min_read: u32,
    /// Post tags.
    pub tags: Vec<String>,
    /// Body excerpt around the first query match.
    pub snippet: String,
    /// Fields the query matched, highest weight first.
    pub matched_fields: Vec<SearchField>,
}

impl SearchResult {
    /// Builds a result from a document, its snippet and matched fields.
    pub fn new(document: &SearchDocument, snippet: String, matched_fields: Vec<SearchField>) -> Self {
        Self {
            id: document.id,
            title: document.title.clone(),
            description: document.description.clone(),
            category: document.category.clone(),
            slug: document.slug.clone(),
            date: document.date.clone(),
            min_read: document.min_read,
            tags: document.tags.clone(),
            snippet,
            matched_fields,
        }
    }
}

/// Response envelope for a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResponse {
    /// The trimmed query.
    pub query: String,
    /// Number of results.
    pub total: usize,
    /// Ranked results.
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Creates a response over `results`.
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        Self {
            query: query.into(),
            total: results.len(),
            results,
        }
    }

    /// A response with no results.
    pub fn empty(query: impl Into<String>) -> Self {
        Self::new(query, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialized_shape() {
        let document = SearchDocument {
            id: 4,
            title: "Learning React Hooks".into(),
            description: "State".into(),
            category: "frontend".into(),
            slug: "react-hooks".into(),
            date: "2024-03-01".into(),
            min_read: 3,
            tags: vec!["react".into()],
            body: "ignored".into(),
        };
        let result = SearchResult::new(
            &document,
            "Hooks...".into(),
            vec![SearchField::Title, SearchField::Tags],
        );
        let response = SearchResponse::new("react", vec![result]);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "query": "react",
                "total": 1,
                "results": [{
                    "id": 4,
                    "title": "Learning React Hooks",
                    "description": "State",
                    "category": "frontend",
                    "slug": "react-hooks",
                    "date": "2024-03-01",
                    "minRead": 3,
                    "tags": ["react"],
                    "snippet": "Hooks...",
                    "matchedFields": ["title", "tags"],
                }],
            })
        );
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(
            serde_json::to_value(SearchResponse::empty("")).unwrap(),
            json!({"query": "", "total": 0, "results": []})
        );
    }
}
