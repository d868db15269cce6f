//! Mock literature repository for deterministic testing

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use theriac_domain::{DocumentMetadata, DocumentRepository, DocumentSection};

/// Error returned by the mock repository
#[derive(Debug, Error)]
#[error("Mock repository error: {0}")]
pub struct MockRepositoryError(pub String);

/// Mock document repository for deterministic testing
///
/// Returns pre-configured search results and documents without any network
/// calls. Search results are keyed by drug name and matched by substring
/// against the full query, so tests do not have to reproduce query syntax.
///
/// # Examples
///
/// ```
/// use theriac_extractor::MockDocumentRepository;
/// use theriac_domain::{DocumentMetadata, DocumentRepository};
///
/// let mut repository = MockDocumentRepository::new();
/// repository.add_search_results("warfarin", &["doc-1"]);
/// repository.add_document(DocumentMetadata {
///     id: "doc-1".to_string(),
///     title: "Warfarin and fluconazole".to_string(),
///     ..Default::default()
/// });
///
/// let ids = repository.search("\"warfarin\" AND interaction", 10).unwrap();
/// assert_eq!(ids, vec!["doc-1".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockDocumentRepository {
    search_results: Arc<Mutex<HashMap<String, Vec<String>>>>,
    documents: Arc<Mutex<HashMap<String, DocumentMetadata>>>,
    full_texts: Arc<Mutex<HashMap<String, Vec<DocumentSection>>>>,
    search_errors: Arc<Mutex<HashSet<String>>>,
    metadata_errors: Arc<Mutex<HashSet<String>>>,
    search_count: Arc<Mutex<usize>>,
    metadata_count: Arc<Mutex<usize>>,
    full_text_count: Arc<Mutex<usize>>,
}

impl MockDocumentRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the document ids returned for queries mentioning a drug
    pub fn add_search_results(&mut self, drug: impl Into<String>, document_ids: &[&str]) {
        self.search_results.lock().unwrap().insert(
            drug.into().to_lowercase(),
            document_ids.iter().map(|id| id.to_string()).collect(),
        );
    }

    /// Configure metadata for one document, keyed by its id
    pub fn add_document(&mut self, metadata: DocumentMetadata) {
        self.documents
            .lock()
            .unwrap()
            .insert(metadata.id.clone(), metadata);
    }

    /// Configure full-text sections for one document
    pub fn add_full_text(&mut self, document_id: impl Into<String>, sections: Vec<DocumentSection>) {
        self.full_texts
            .lock()
            .unwrap()
            .insert(document_id.into(), sections);
    }

    /// Configure searches mentioning a drug to fail
    pub fn add_search_error(&mut self, drug: impl Into<String>) {
        self.search_errors
            .lock()
            .unwrap()
            .insert(drug.into().to_lowercase());
    }

    /// Configure metadata fetches for a document to fail
    pub fn add_metadata_error(&mut self, document_id: impl Into<String>) {
        self.metadata_errors
            .lock()
            .unwrap()
            .insert(document_id.into());
    }

    /// Get the number of times search was called
    pub fn search_count(&self) -> usize {
        *self.search_count.lock().unwrap()
    }

    /// Get the number of times fetch_metadata was called
    pub fn metadata_count(&self) -> usize {
        *self.metadata_count.lock().unwrap()
    }

    /// Get the number of times fetch_full_text was called
    pub fn full_text_count(&self) -> usize {
        *self.full_text_count.lock().unwrap()
    }

    /// Reset all call counters
    pub fn reset_counts(&self) {
        *self.search_count.lock().unwrap() = 0;
        *self.metadata_count.lock().unwrap() = 0;
        *self.full_text_count.lock().unwrap() = 0;
    }
}

impl DocumentRepository for MockDocumentRepository {
    type Error = MockRepositoryError;

    fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, Self::Error> {
        *self.search_count.lock().unwrap() += 1;

        let query_lower = query.to_lowercase();
        if let Some(drug) = self
            .search_errors
            .lock()
            .unwrap()
            .iter()
            .find(|drug| query_lower.contains(drug.as_str()))
        {
            return Err(MockRepositoryError(format!("search failed for '{}'", drug)));
        }

        let results = self.search_results.lock().unwrap();
        let ids = results
            .iter()
            .find(|(drug, _)| query_lower.contains(drug.as_str()))
            .map(|(_, ids)| ids.clone())
            .unwrap_or_default();
        Ok(ids.into_iter().take(max_results).collect())
    }

    fn fetch_metadata(&self, document_id: &str) -> Result<DocumentMetadata, Self::Error> {
        *self.metadata_count.lock().unwrap() += 1;

        if self.metadata_errors.lock().unwrap().contains(document_id) {
            return Err(MockRepositoryError(format!(
                "metadata fetch failed for '{}'",
                document_id
            )));
        }
        self.documents
            .lock()
            .unwrap()
            .get(document_id)
            .cloned()
            .ok_or_else(|| {
                MockRepositoryError(format!("no document configured for '{}'", document_id))
            })
    }

    fn fetch_full_text(&self, document_id: &str) -> Result<Vec<DocumentSection>, Self::Error> {
        *self.full_text_count.lock().unwrap() += 1;

        Ok(self
            .full_texts
            .lock()
            .unwrap()
            .get(document_id)
            .cloned()
            .unwrap_or_default())
    }
}
