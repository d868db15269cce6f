//! Provenance tracking for evidence records

use serde::{Deserialize, Serialize};

/// Bibliographic provenance of one evidence record
///
/// Carried verbatim from the source document so downstream consumers can
/// audit any merged claim back to the text it came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Document or label title
    pub title: String,

    /// Author list as given by the source
    pub authors: Vec<String>,

    /// Publication date string as given by the source (not parsed)
    pub publication_date: Option<String>,

    /// Journal or registry name
    pub journal: Option<String>,

    /// Stable reference: DOI, registry URL, or label identifier
    pub reference: Option<String>,

    /// The text snippet the claim was extracted from
    pub raw_snippet: String,
}

impl Provenance {
    /// Create a new provenance entry from a title and source snippet
    pub fn new(title: String, raw_snippet: String) -> Self {
        Self {
            title,
            raw_snippet,
            ..Default::default()
        }
    }

    /// Attach an author list
    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    /// Attach a journal or registry name
    pub fn with_journal(mut self, journal: String) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Attach a publication date string
    pub fn with_publication_date(mut self, date: String) -> Self {
        self.publication_date = Some(date);
        self
    }

    /// Attach a stable reference (DOI or URL)
    pub fn with_reference(mut self, reference: String) -> Self {
        self.reference = Some(reference);
        self
    }
}
