//! Quality filtering of merged evidence
//!
//! The filter runs last, after merging and scoring, and enforces the
//! configured floor on what a run may emit. Filtering is a data-quality
//! judgement: rejected evidence lands in an explained bucket, it does not
//! raise errors.

use std::fmt;

use theriac_domain::scoring::mechanism_is_known;
use theriac_domain::MergedEvidence;
use tracing::debug;

use crate::FilterConfig;

/// Reasons merged evidence fails the quality floor
#[derive(Debug, Clone, PartialEq)]
pub enum FilterReason {
    /// Composite score below the configured minimum
    CompositeBelowMinimum {
        /// Configured minimum
        minimum: f64,
        /// Actual composite score
        actual: f64,
    },

    /// Extraction confidence below the configured minimum
    ConfidenceBelowMinimum {
        /// Configured minimum
        minimum: u8,
        /// Actual confidence
        actual: u8,
    },

    /// Mechanism is still the unknown placeholder
    UnknownMechanism,

    /// No canonical pathway was captured
    NoPathways,
}

impl fmt::Display for FilterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterReason::CompositeBelowMinimum { minimum, actual } => {
                write!(f, "Composite score {} below minimum {}", actual, minimum)
            }
            FilterReason::ConfidenceBelowMinimum { minimum, actual } => {
                write!(f, "Confidence {} below minimum {}", actual, minimum)
            }
            FilterReason::UnknownMechanism => write!(f, "Mechanism is unknown"),
            FilterReason::NoPathways => write!(f, "No canonical pathway captured"),
        }
    }
}

/// One filtered-out record with the checks it failed
#[derive(Debug, Clone)]
pub struct FilteredRecord {
    /// The merged evidence that fell below the floor
    pub evidence: MergedEvidence,

    /// Every check it failed
    pub reasons: Vec<FilterReason>,
}

/// Outcome of filtering a run's merged evidence
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome {
    /// Evidence that met the quality floor
    pub accepted: Vec<MergedEvidence>,

    /// Evidence that fell below it, with reasons
    pub rejected: Vec<FilteredRecord>,
}

/// Enforces the configured quality floor on merged evidence
pub struct QualityFilter {
    config: FilterConfig,
}

impl QualityFilter {
    /// Create a filter with the given configuration
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Create a filter with default thresholds
    pub fn default_config() -> Self {
        Self::new(FilterConfig::default())
    }

    /// Every check the given evidence fails, empty when it passes
    ///
    /// A record the scorer never visited carries no composite score and is
    /// treated as scoring zero, so it fails any positive threshold.
    pub fn evaluate(&self, merged: &MergedEvidence) -> Vec<FilterReason> {
        let record = &merged.record;
        let mut reasons = Vec::new();

        let composite = record.evidence.composite_score.unwrap_or(0.0);
        if composite < self.config.min_composite_score {
            reasons.push(FilterReason::CompositeBelowMinimum {
                minimum: self.config.min_composite_score,
                actual: composite,
            });
        }

        if record.evidence.confidence < self.config.min_confidence {
            reasons.push(FilterReason::ConfidenceBelowMinimum {
                minimum: self.config.min_confidence,
                actual: record.evidence.confidence,
            });
        }

        if self.config.require_known_mechanism && !mechanism_is_known(&record.interaction.mechanism)
        {
            reasons.push(FilterReason::UnknownMechanism);
        }

        if self.config.require_pathways && record.interaction.pathways.is_empty() {
            reasons.push(FilterReason::NoPathways);
        }

        reasons
    }

    /// Partition merged evidence into accepted and rejected buckets
    pub fn apply(&self, evidence: Vec<MergedEvidence>) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for merged in evidence {
            let reasons = self.evaluate(&merged);
            if reasons.is_empty() {
                outcome.accepted.push(merged);
            } else {
                debug!(
                    "Filtering out pair evidence {}: {}",
                    merged.record.id,
                    reasons
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                );
                outcome.rejected.push(FilteredRecord {
                    evidence: merged,
                    reasons,
                });
            }
        }

        outcome
    }
}
