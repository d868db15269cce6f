//! Conflict resolution across sources describing the same drug pair
//!
//! Merge policy: the highest-quality record becomes the base, severity and
//! evidence level take a strict maximum, mechanisms and effects union into
//! semicolon-joined sets, pathways union, and pharmacokinetic parameters
//! fill in only where the base has no measurement. The result is
//! deterministic for any input order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use theriac_domain::scoring::{self, ScoringConfig};
use theriac_domain::{EvidenceRecord, MergedEvidence, PairKey};
use tracing::debug;

use crate::error::NormalizerError;

/// Separator for union fields that keep more than one distinct value
const UNION_SEPARATOR: &str = ";";

/// Merges same-pair record groups into one record per pair
pub struct Merger {
    config: ScoringConfig,
}

impl Merger {
    /// Create a merger with the given scoring configuration
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Create a merger with default scoring weights
    pub fn default_config() -> Self {
        Self::new(ScoringConfig::default())
    }

    /// Merge one group of records describing the same pair
    ///
    /// A single-record group passes through unchanged apart from score
    /// assignment. Quality and composite scores are recomputed and stored
    /// on every merged record.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizerError::EmptyGroup`] for an empty group; feeding
    /// one is a caller bug, not a data-quality condition.
    pub fn merge(&self, group: &[EvidenceRecord]) -> Result<MergedEvidence, NormalizerError> {
        if group.is_empty() {
            return Err(NormalizerError::EmptyGroup);
        }

        if group.len() == 1 {
            let mut record = group[0].clone();
            scoring::apply_scores(&mut record, &self.config);
            return Ok(MergedEvidence::single(record));
        }

        // Quality ties break on record id so the chosen base never depends
        // on input order.
        let mut ranked: Vec<(f64, &EvidenceRecord)> = group
            .iter()
            .map(|record| (scoring::quality_score(record, &self.config), record))
            .collect();
        ranked.sort_by(|(qa, a), (qb, b)| {
            qb.partial_cmp(qa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut merged = ranked[0].1.clone();
        let mut mechanisms = split_union(&merged.interaction.mechanism);
        let mut effects = split_union(&merged.interaction.effect);
        let mut source_types = BTreeSet::new();
        source_types.insert(merged.source_type);

        for (_, record) in &ranked[1..] {
            if record.interaction.severity > merged.interaction.severity {
                merged.interaction.severity = record.interaction.severity;
            }
            if record.evidence.level > merged.evidence.level {
                merged.evidence.level = record.evidence.level;
            }

            mechanisms.extend(split_union(&record.interaction.mechanism));
            effects.extend(split_union(&record.interaction.effect));
            merged
                .interaction
                .pathways
                .extend(record.interaction.pathways.iter().cloned());

            match (&mut merged.pharmacokinetics, &record.pharmacokinetics) {
                (Some(base_pk), Some(other)) => base_pk.fill_missing_from(other),
                (None, Some(other)) => merged.pharmacokinetics = Some(other.clone()),
                _ => {}
            }

            source_types.insert(record.source_type);
        }

        merged.interaction.mechanism = join_union(&mechanisms);
        merged.interaction.effect = join_union(&effects);

        // Contributors are recorded in ranked order so the list is stable
        // across input orders. A contributor that is itself a prior merge
        // result folds its whole history in; nothing is ever duplicated.
        for (_, record) in &ranked {
            let contributed = record
                .extraction
                .merged_source_ids
                .iter()
                .chain(std::iter::once(&record.source_id));
            for source_id in contributed {
                if !merged.extraction.merged_source_ids.contains(source_id) {
                    merged.extraction.merged_source_ids.push(source_id.clone());
                }
            }
        }

        scoring::apply_scores(&mut merged, &self.config);

        Ok(MergedEvidence {
            record: merged,
            sources_count: group.len(),
            source_types,
        })
    }

    /// Merge every group, producing one merged record per pair
    ///
    /// Groups are visited in pair-key order, so the output order is
    /// deterministic.
    pub fn merge_all(
        &self,
        groups: BTreeMap<PairKey, Vec<EvidenceRecord>>,
    ) -> Result<Vec<MergedEvidence>, NormalizerError> {
        let mut merged = Vec::with_capacity(groups.len());
        for (pair, group) in &groups {
            debug!("Merging {} record(s) for pair {}", group.len(), pair);
            merged.push(self.merge(group)?);
        }
        Ok(merged)
    }
}

fn split_union(value: &str) -> BTreeSet<String> {
    value
        .split(UNION_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_union(parts: &BTreeSet<String>) -> String {
    parts
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(UNION_SEPARATOR)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::resolved_record;
    use proptest::prelude::*;
    use theriac_domain::{EvidenceLevel, RecordId, Severity, SourceType, StudyType};

    fn severity_from(i: u8) -> Severity {
        match i % 4 {
            0 => Severity::Minor,
            1 => Severity::Moderate,
            2 => Severity::Major,
            _ => Severity::Contraindicated,
        }
    }

    fn level_from(i: u8) -> EvidenceLevel {
        match i % 3 {
            0 => EvidenceLevel::Low,
            1 => EvidenceLevel::Medium,
            _ => EvidenceLevel::High,
        }
    }

    fn study_from(i: u8) -> StudyType {
        match i % 6 {
            0 => StudyType::Rct,
            1 => StudyType::Pharmacokinetic,
            2 => StudyType::Observational,
            3 => StudyType::InVitro,
            4 => StudyType::CaseReport,
            _ => StudyType::Unknown,
        }
    }

    fn source_from(i: u8) -> SourceType {
        match i % 3 {
            0 => SourceType::Publication,
            1 => SourceType::ClinicalTrial,
            _ => SourceType::RegulatoryLabel,
        }
    }

    fn mechanism_from(i: u8) -> &'static str {
        match i % 3 {
            0 => "enzyme inhibition",
            1 => "transporter inhibition",
            _ => "unknown",
        }
    }

    type RecordParams = (u8, u8, u8, u8, u8);

    fn build_group(params: &[RecordParams]) -> Vec<EvidenceRecord> {
        params
            .iter()
            .enumerate()
            .map(|(i, &(sev, lvl, study, src, conf))| {
                let mut record = resolved_record("a", "b");
                // Deterministic ids keep the quality tie-break reproducible.
                record.id = RecordId::from_value(i as u128 + 1);
                record.source_id = format!("src:{}", i);
                record.interaction.severity = severity_from(sev);
                record.interaction.mechanism = mechanism_from(sev).to_string();
                record.evidence.level = level_from(lvl);
                record.evidence.study_type = study_from(study);
                record.source_type = source_from(src);
                record.evidence.confidence = conf;
                record
            })
            .collect()
    }

    fn params_and_order() -> impl Strategy<Value = (Vec<RecordParams>, Vec<usize>)> {
        prop::collection::vec(
            (0u8..4, 0u8..3, 0u8..6, 0u8..3, 0u8..=100u8),
            2..6,
        )
        .prop_flat_map(|params| {
            let indexes: Vec<usize> = (0..params.len()).collect();
            (Just(params), Just(indexes).prop_shuffle())
        })
    }

    proptest! {
        /// Property: the merged result does not depend on input order
        #[test]
        fn test_merge_is_order_independent((params, order) in params_and_order()) {
            let records = build_group(&params);
            let shuffled: Vec<EvidenceRecord> =
                order.iter().map(|&i| records[i].clone()).collect();

            let merger = Merger::default_config();
            let forward = merger.merge(&records).unwrap();
            let reordered = merger.merge(&shuffled).unwrap();

            prop_assert_eq!(forward, reordered);
        }

        /// Property: merged severity and level are the group maxima
        #[test]
        fn test_merge_takes_maxima(
            params in prop::collection::vec((0u8..4, 0u8..3, 0u8..6, 0u8..3, 0u8..=100u8), 2..6)
        ) {
            let records = build_group(&params);
            let merger = Merger::default_config();
            let merged = merger.merge(&records).unwrap();

            let max_severity = records.iter().map(|r| r.interaction.severity).max().unwrap();
            let max_level = records.iter().map(|r| r.evidence.level).max().unwrap();

            prop_assert_eq!(merged.record.interaction.severity, max_severity);
            prop_assert_eq!(merged.record.evidence.level, max_level);
        }

        /// Property: re-merging with an original contributor changes nothing
        /// about the clinical content
        #[test]
        fn test_remerge_with_contributor_is_stable(
            params in prop::collection::vec((0u8..4, 0u8..3, 0u8..6, 0u8..3, 0u8..=100u8), 2..5)
        ) {
            let records = build_group(&params);
            let merger = Merger::default_config();
            let merged = merger.merge(&records).unwrap();

            for contributor in &records {
                let again = merger
                    .merge(&[merged.record.clone(), contributor.clone()])
                    .unwrap();

                prop_assert_eq!(
                    again.record.interaction.severity,
                    merged.record.interaction.severity
                );
                prop_assert_eq!(again.record.evidence.level, merged.record.evidence.level);
                prop_assert_eq!(
                    &again.record.interaction.mechanism,
                    &merged.record.interaction.mechanism
                );
                prop_assert_eq!(
                    &again.record.interaction.pathways,
                    &merged.record.interaction.pathways
                );
                prop_assert_eq!(
                    &again.record.extraction.merged_source_ids,
                    &merged.record.extraction.merged_source_ids
                );
            }
        }
    }
}
