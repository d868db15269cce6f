//! Theriac Literature Extractor
//!
//! Mines drug-drug interaction evidence from biomedical literature.
//!
//! # Overview
//!
//! The LiteratureExtractor is the primary pathway for turning published text
//! into structured evidence records. It searches a document repository for a
//! drug, walks the hits, and applies lexical analysis to every
//! interaction-bearing text unit: partner drug mentions, mechanism and
//! pathway wording, quantified pharmacokinetic changes, severity cues, and
//! study design.
//!
//! # Architecture
//!
//! ```text
//! Drug name → Repository search → Documents → Text units → EvidenceRecords
//! ```
//!
//! # Key Features
//!
//! - **Lexical Mining**: Keyword, suffix, and pattern tables drive every
//!   signal; no model calls, fully deterministic
//! - **Pharmacokinetic Capture**: AUC, Cmax, and clearance changes with
//!   fold-to-percent conversion
//! - **Severity Escalation**: Measured AUC increases raise textual grades
//! - **Rate-Limited Bulk Runs**: Batched concurrency with pacing between
//!   repository fetches, plus TTL caching of searches and metadata
//!
//! # Example Usage
//!
//! ```no_run
//! use theriac_extractor::{ExtractionOptions, ExtractorConfig, LiteratureExtractor, MockDocumentRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MockDocumentRepository::new();
//! let config = ExtractorConfig::default();
//! let extractor = LiteratureExtractor::new(repository, config);
//!
//! let options = ExtractionOptions::default();
//! let extraction = extractor.extract_for_drug("warfarin", &options).await?;
//!
//! println!("Extracted: {} records", extraction.records.len());
//! println!("Documents: {} processed, {} skipped",
//!     extraction.documents_processed, extraction.documents_skipped);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod extractor;
mod lexicon;
mod mechanism;
mod mentions;
mod mock;
mod pk;
mod severity;
mod study;
mod types;

#[cfg(test)]
mod tests;

pub use config::{ConfidenceWeights, EscalationThresholds, ExtractorConfig};
pub use error::ExtractorError;
pub use extractor::LiteratureExtractor;
pub use lexicon::{Lexicon, MechanismRule, SeverityCue};
pub use mock::{MockDocumentRepository, MockRepositoryError};
pub use types::{BulkExtraction, BulkFailure, DrugExtraction, ExtractionOptions};
