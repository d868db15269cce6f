//! Outcome types for normalization and mining runs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use theriac_domain::record::{EvidenceRecord, MergedEvidence};
use theriac_extractor::BulkFailure;
use theriac_normalizer::NormalizationReport;

/// A record the pipeline refused, and why
///
/// The two variants mark where in the run the record fell out: `Invalid`
/// records never made it past standardization or structural validation,
/// while `Filtered` evidence survived merging but missed the quality floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectedRecord {
    /// Rejected before merging, while still a raw record
    Invalid {
        /// The record as it arrived
        record: EvidenceRecord,

        /// Why it was rejected
        reason: String,
    },

    /// Rejected after merging, by the quality filter
    Filtered {
        /// The merged evidence that fell below the quality floor
        record: MergedEvidence,

        /// Why it was rejected
        reason: String,
    },
}

impl RejectedRecord {
    /// The rejection reason, regardless of variant
    pub fn reason(&self) -> &str {
        match self {
            Self::Invalid { reason, .. } => reason,
            Self::Filtered { reason, .. } => reason,
        }
    }
}

/// Stage-by-stage accounting for one normalization run
///
/// `input = dropped + invalid + records that reached grouping`, and every
/// merged record is either `filtered` or `accepted`, so nothing handed to
/// [`normalize`](crate::NormalizationEngine::normalize) goes missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAccounting {
    /// Records handed to the run
    pub input: usize,

    /// Records dropped during standardization
    pub dropped: usize,

    /// Records rejected by structural validation
    pub invalid: usize,

    /// Interaction-pair groups formed
    pub groups: usize,

    /// Merged records rejected by the quality filter
    pub filtered: usize,

    /// Merged records accepted
    pub accepted: usize,
}

/// Result of one normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationOutcome {
    /// Merged evidence that survived every stage
    pub accepted: Vec<MergedEvidence>,

    /// Everything the run refused, with reasons
    pub rejected: Vec<RejectedRecord>,

    /// Distributions and quality summary over the accepted set
    pub report: NormalizationReport,

    /// Stage-by-stage counts
    pub accounting: RunAccounting,
}

/// Result of a full mine run: bulk extraction plus normalization
///
/// Extraction failures never abort a run; the drugs that failed are listed
/// here next to the normalization result over everything that was mined.
#[derive(Debug, Clone)]
pub struct MiningOutcome {
    /// Normalization result over every record extracted
    pub normalization: NormalizationOutcome,

    /// Drugs whose extraction failed entirely
    pub extraction_failures: Vec<BulkFailure>,

    /// Records extracted per drug, before normalization
    pub per_drug_counts: HashMap<String, usize>,

    /// Extraction batches processed
    pub batches: usize,
}
