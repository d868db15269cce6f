//! Structural validation of evidence records
//!
//! Validation runs after entity resolution and before grouping: a record
//! that cannot identify both drugs, name a mechanism, or point back at its
//! source is rejected with a reason rather than silently lost. Severity,
//! evidence level, and source type are closed enumerations in this model,
//! so membership checks on them cannot fail; the live checks are the
//! identifier and text fields.

use std::fmt;

use theriac_domain::EvidenceRecord;
use tracing::debug;

/// Result of validating one record
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the record passed validation
    pub status: ValidationStatus,

    /// Rejection reasons (if any)
    pub reasons: Vec<RejectionReason>,
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Record accepted
    Accepted,

    /// Record rejected
    Rejected,
}

/// Reasons a record fails structural validation
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// A drug name could not be resolved to a normalized identifier
    UnresolvedDrug {
        /// The raw name that failed resolution
        name: String,
    },

    /// The mechanism field is empty
    MissingMechanism,

    /// The source identifier is empty
    MissingSourceId,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::UnresolvedDrug { name } => {
                write!(f, "Drug '{}' could not be resolved", name)
            }
            RejectionReason::MissingMechanism => write!(f, "Mechanism is empty"),
            RejectionReason::MissingSourceId => write!(f, "Source identifier is empty"),
        }
    }
}

/// One rejected record with everything needed to explain the rejection
#[derive(Debug, Clone)]
pub struct InvalidRecord {
    /// The record as it arrived
    pub record: EvidenceRecord,

    /// Every check it failed
    pub reasons: Vec<RejectionReason>,
}

/// Outcome of validating a batch of records
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Records that passed every check
    pub valid: Vec<EvidenceRecord>,

    /// Records that failed, with reasons
    pub rejected: Vec<InvalidRecord>,
}

/// Validates records before grouping
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    /// Create a validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a single record against the structural rules
    pub fn validate(&self, record: &EvidenceRecord) -> ValidationResult {
        let mut reasons = Vec::new();

        // 1. Both drugs must carry resolved identifiers
        if !record.drug_a.is_resolved() {
            reasons.push(RejectionReason::UnresolvedDrug {
                name: record.drug_a.raw_name.clone(),
            });
        }
        if !record.drug_b.is_resolved() {
            reasons.push(RejectionReason::UnresolvedDrug {
                name: record.drug_b.raw_name.clone(),
            });
        }

        // 2. Mechanism text must be present
        if record.interaction.mechanism.trim().is_empty() {
            reasons.push(RejectionReason::MissingMechanism);
        }

        // 3. The record must point back at its source
        if record.source_id.trim().is_empty() {
            reasons.push(RejectionReason::MissingSourceId);
        }

        let status = if reasons.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Rejected
        };

        ValidationResult { status, reasons }
    }

    /// Partition a batch into valid records and explained rejections
    pub fn partition(&self, records: Vec<EvidenceRecord>) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for record in records {
            let result = self.validate(&record);
            match result.status {
                ValidationStatus::Accepted => outcome.valid.push(record),
                ValidationStatus::Rejected => {
                    debug!(
                        "Rejecting record {}: {}",
                        record.id,
                        result
                            .reasons
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("; ")
                    );
                    outcome.rejected.push(InvalidRecord {
                        record,
                        reasons: result.reasons,
                    });
                }
            }
        }

        outcome
    }
}
