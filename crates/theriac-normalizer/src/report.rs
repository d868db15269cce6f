//! Normalization run reports
//!
//! One report per run: how much the input shrank, where the accepted
//! evidence came from, and how it scored. Reports are serializable so runs
//! can be exported and compared over time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use theriac_domain::scoring::mechanism_is_known;
use theriac_domain::MergedEvidence;

/// Composite score at or above which a record counts as high scoring
pub const HIGH_SCORE_THRESHOLD: f64 = 70.0;

/// Summary of one normalization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationReport {
    /// Raw records that entered the run
    pub input_count: usize,

    /// Merged records that survived
    pub accepted_count: usize,

    /// Percentage of input eliminated, rounded, always within [0, 100]
    pub reduction_percent: f64,

    /// Accepted records per contributing source type; a record counts once
    /// under every source type that fed it
    pub source_type_distribution: BTreeMap<String, usize>,

    /// Accepted records per severity grade
    pub severity_distribution: BTreeMap<String, usize>,

    /// Accepted records per evidence level
    pub level_distribution: BTreeMap<String, usize>,

    /// Accepted records per primary mechanism category
    pub mechanism_distribution: BTreeMap<String, usize>,

    /// Mean composite score across accepted records
    pub average_composite_score: f64,

    /// Accepted records with a composite score at or above the threshold
    pub high_scoring_count: usize,

    /// Accepted records with a known (non-placeholder) mechanism
    pub known_mechanism_count: usize,
}

impl NormalizationReport {
    /// Build a report from the run's input size and its accepted output
    pub fn generate(input_count: usize, accepted: &[MergedEvidence]) -> Self {
        let accepted_count = accepted.len();
        let reduction_percent = if input_count == 0 {
            0.0
        } else {
            let ratio = accepted_count as f64 / input_count as f64;
            (100.0 * (1.0 - ratio)).round().clamp(0.0, 100.0)
        };

        let mut source_type_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut severity_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut level_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut mechanism_distribution: BTreeMap<String, usize> = BTreeMap::new();
        let mut composite_total = 0.0;
        let mut high_scoring_count = 0;
        let mut known_mechanism_count = 0;

        for merged in accepted {
            let record = &merged.record;

            for source in &merged.source_types {
                *source_type_distribution
                    .entry(source.as_str().to_string())
                    .or_insert(0) += 1;
            }
            *severity_distribution
                .entry(record.interaction.severity.as_str().to_string())
                .or_insert(0) += 1;
            *level_distribution
                .entry(record.evidence.level.as_str().to_string())
                .or_insert(0) += 1;
            *mechanism_distribution
                .entry(primary_mechanism(&record.interaction.mechanism))
                .or_insert(0) += 1;

            let composite = record.evidence.composite_score.unwrap_or(0.0);
            composite_total += composite;
            if composite >= HIGH_SCORE_THRESHOLD {
                high_scoring_count += 1;
            }
            if mechanism_is_known(&record.interaction.mechanism) {
                known_mechanism_count += 1;
            }
        }

        let average_composite_score = if accepted_count == 0 {
            0.0
        } else {
            composite_total / accepted_count as f64
        };

        Self {
            input_count,
            accepted_count,
            reduction_percent,
            source_type_distribution,
            severity_distribution,
            level_distribution,
            mechanism_distribution,
            average_composite_score,
            high_scoring_count,
            known_mechanism_count,
        }
    }

    /// Generate a human-readable summary of the run
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Normalization Run Summary"),
            format!("========================="),
            format!("Input records: {}", self.input_count),
            format!(
                "Accepted records: {} ({}% reduction)",
                self.accepted_count, self.reduction_percent
            ),
            format!("Average composite score: {:.1}", self.average_composite_score),
            format!(
                "High scoring (>= {}): {}",
                HIGH_SCORE_THRESHOLD, self.high_scoring_count
            ),
            format!("Known mechanism: {}", self.known_mechanism_count),
            format!(""),
        ];

        if !self.source_type_distribution.is_empty() {
            lines.push(format!("By source type:"));
            for (source, count) in &self.source_type_distribution {
                lines.push(format!("  {}: {}", source, count));
            }
            lines.push(format!(""));
        }

        if !self.severity_distribution.is_empty() {
            lines.push(format!("By severity:"));
            for (severity, count) in &self.severity_distribution {
                lines.push(format!("  {}: {}", severity, count));
            }
            lines.push(format!(""));
        }

        if !self.level_distribution.is_empty() {
            lines.push(format!("By evidence level:"));
            for (level, count) in &self.level_distribution {
                lines.push(format!("  {}: {}", level, count));
            }
            lines.push(format!(""));
        }

        if !self.mechanism_distribution.is_empty() {
            lines.push(format!("By mechanism:"));
            for (mechanism, count) in &self.mechanism_distribution {
                lines.push(format!("  {}: {}", mechanism, count));
            }
        }

        lines.join("\n")
    }
}

/// First entry of a union-merged mechanism string
fn primary_mechanism(mechanism: &str) -> String {
    let primary = mechanism.split(';').next().unwrap_or("").trim();
    if primary.is_empty() {
        "unknown".to_string()
    } else {
        primary.to_string()
    }
}
