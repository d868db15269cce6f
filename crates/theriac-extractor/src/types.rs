//! Request and response types for extraction

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use theriac_domain::record::EvidenceRecord;

/// Options controlling a single-drug extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Maximum documents to take from repository search
    pub max_results: usize,

    /// Publication-year window: current year minus this many years
    pub year_range_years: u16,

    /// Fetch full text when the repository advertises it
    pub include_full_text: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            max_results: 20,
            year_range_years: 10,
            include_full_text: false,
        }
    }
}

impl ExtractionOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }
        if self.max_results > 1_000 {
            return Err(format!(
                "max_results {} exceeds the repository page ceiling of 1000",
                self.max_results
            ));
        }
        if self.year_range_years == 0 {
            return Err("year_range_years must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Result of extracting one drug
#[derive(Debug, Clone)]
pub struct DrugExtraction {
    /// Drug the extraction ran for
    pub drug: String,

    /// Provisional records, pre-normalization
    pub records: Vec<EvidenceRecord>,

    /// Documents successfully processed
    pub documents_processed: usize,

    /// Documents skipped after fetch or parse failures
    pub documents_skipped: usize,
}

/// One drug that failed entirely during bulk extraction
#[derive(Debug, Clone)]
pub struct BulkFailure {
    /// Drug name that failed
    pub drug: String,

    /// Reason for failure
    pub reason: String,
}

/// Result of a bulk extraction over many drugs
///
/// Failures never abort the run; they are collected here and the record set
/// reflects only the successes.
#[derive(Debug, Clone, Default)]
pub struct BulkExtraction {
    /// All records from all drugs that succeeded
    pub records: Vec<EvidenceRecord>,

    /// Record count per successfully extracted drug
    pub per_drug_counts: HashMap<String, usize>,

    /// Drugs that failed entirely
    pub failures: Vec<BulkFailure>,

    /// Number of batches processed
    pub batches: usize,
}
