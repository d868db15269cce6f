//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. The literature repository and the terminology service are
//! consumed here as black boxes; concrete transports (HTTP clients, local
//! corpora) live outside this workspace and plug in through these traits.

/// Metadata for one document in a literature repository
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentMetadata {
    /// Repository-scoped document identifier (e.g. a PMID)
    pub id: String,

    /// Document title
    pub title: String,

    /// Author list
    pub authors: Vec<String>,

    /// Journal or venue name
    pub journal: Option<String>,

    /// Publication date string as given by the repository
    pub publication_date: Option<String>,

    /// Repository publication-type tags (e.g. "Randomized Controlled Trial")
    pub publication_types: Vec<String>,

    /// Cross-reference identifiers (DOIs, registry ids)
    pub cross_ref_ids: Vec<String>,

    /// Abstract text, when the repository provides one
    pub abstract_text: Option<String>,

    /// Whether full text can be fetched for this document
    pub has_full_text: bool,
}

/// One section of a full-text document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSection {
    /// Section heading (e.g. "Results")
    pub heading: String,

    /// Section body text
    pub body: String,
}

/// Trait for searching and fetching from a literature repository
///
/// Implemented by infrastructure outside this workspace. Calls are
/// synchronous; async callers wrap them in blocking tasks.
pub trait DocumentRepository {
    /// Error type for repository operations
    type Error;

    /// Search the repository, returning document identifiers
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, Self::Error>;

    /// Fetch metadata for one document
    fn fetch_metadata(&self, document_id: &str) -> Result<DocumentMetadata, Self::Error>;

    /// Fetch full text for one document, split into sections
    fn fetch_full_text(&self, document_id: &str) -> Result<Vec<DocumentSection>, Self::Error>;
}

/// One candidate returned by the terminology resolution service
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTerm {
    /// Normalized concept identifier
    pub id: String,

    /// Term type tag as reported by the service (e.g. "ingredient", "brand")
    pub term_type: String,

    /// Canonical name for the concept
    pub name: String,
}

/// Trait for resolving drug names to normalized identifiers
///
/// Implemented by infrastructure outside this workspace (a terminology
/// service or a local dictionary). Returns every candidate the service
/// knows; candidate preference is the resolver client's concern.
pub trait ResolutionService {
    /// Error type for resolution operations
    type Error;

    /// Resolve a drug name to candidate concepts
    fn resolve(&self, name: &str) -> Result<Vec<ResolvedTerm>, Self::Error>;
}
