//! Quality and composite scoring module
//!
//! Implements the deterministic scoring formula that turns a record's source
//! tier, evidence level, study design, severity, and mechanism knowledge into
//! a quality score, and blends that with extraction confidence into the
//! composite score used for filtering and ranking.

use serde::{Deserialize, Serialize};

use crate::record::EvidenceRecord;
use crate::{EvidenceLevel, SourceType, StudyType};

/// Scale applied to the source-type weight component (default: 30)
pub const SOURCE_SCALE: f64 = 30.0;

/// Scale applied to the evidence-level weight component (default: 30)
pub const LEVEL_SCALE: f64 = 30.0;

/// Scale applied to the study-type weight component (default: 20)
pub const STUDY_SCALE: f64 = 20.0;

/// Points added per severity rank step (default: 5)
pub const SEVERITY_STEP: f64 = 5.0;

/// Bonus for a known (non-placeholder) mechanism (default: 10)
pub const MECHANISM_BONUS: f64 = 10.0;

/// Bonus for at least one canonical pathway (default: 5)
pub const PATHWAY_BONUS: f64 = 5.0;

/// Per-source-type trust weights in [0, 1]
///
/// Defaults encode the trust hierarchy: regulatory labels over trial
/// registry entries over mined literature. Deployments may retune the
/// values but `validate` insists the hierarchy stays monotonic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceWeights {
    /// Weight for regulatory product labels
    pub regulatory_label: f64,
    /// Weight for clinical trial registry entries
    pub clinical_trial: f64,
    /// Weight for mined publications
    pub publication: f64,
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            regulatory_label: 1.0,
            clinical_trial: 0.8,
            publication: 0.6,
        }
    }
}

impl SourceWeights {
    /// Weight for a given source type
    pub fn weight(&self, source: SourceType) -> f64 {
        match source {
            SourceType::RegulatoryLabel => self.regulatory_label,
            SourceType::ClinicalTrial => self.clinical_trial,
            SourceType::Publication => self.publication,
        }
    }
}

/// Per-evidence-level weights in [0, 1]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelWeights {
    /// Weight for high-grade evidence
    pub high: f64,
    /// Weight for medium-grade evidence
    pub medium: f64,
    /// Weight for low-grade evidence
    pub low: f64,
}

impl Default for LevelWeights {
    fn default() -> Self {
        Self {
            high: 1.0,
            medium: 0.6,
            low: 0.3,
        }
    }
}

impl LevelWeights {
    /// Weight for a given evidence level
    pub fn weight(&self, level: EvidenceLevel) -> f64 {
        match level {
            EvidenceLevel::High => self.high,
            EvidenceLevel::Medium => self.medium,
            EvidenceLevel::Low => self.low,
        }
    }
}

/// Per-study-design weights in [0, 1]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyWeights {
    /// Weight for randomized controlled trials
    pub rct: f64,
    /// Weight for dedicated pharmacokinetic studies
    pub pharmacokinetic: f64,
    /// Weight for observational studies
    pub observational: f64,
    /// Weight for in-vitro work
    pub in_vitro: f64,
    /// Weight for case reports
    pub case_report: f64,
    /// Weight when the design is unknown
    pub unknown: f64,
}

impl Default for StudyWeights {
    fn default() -> Self {
        Self {
            rct: 1.0,
            pharmacokinetic: 0.9,
            observational: 0.7,
            in_vitro: 0.5,
            case_report: 0.4,
            unknown: 0.3,
        }
    }
}

impl StudyWeights {
    /// Weight for a given study type
    pub fn weight(&self, study: StudyType) -> f64 {
        match study {
            StudyType::Rct => self.rct,
            StudyType::Pharmacokinetic => self.pharmacokinetic,
            StudyType::Observational => self.observational,
            StudyType::InVitro => self.in_vitro,
            StudyType::CaseReport => self.case_report,
            StudyType::Unknown => self.unknown,
        }
    }
}

/// Configuration for quality and composite scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Source-type trust weights
    pub source_weights: SourceWeights,

    /// Evidence-level weights
    pub level_weights: LevelWeights,

    /// Study-design weights
    pub study_weights: StudyWeights,

    /// Share of the composite taken from the quality score
    pub quality_share: f64,

    /// Share of the composite taken from extraction confidence
    pub confidence_share: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            source_weights: SourceWeights::default(),
            level_weights: LevelWeights::default(),
            study_weights: StudyWeights::default(),
            quality_share: 0.7,
            confidence_share: 0.3,
        }
    }
}

impl ScoringConfig {
    /// Validate the configuration
    ///
    /// All weights must sit in [0, 1], each weight table must preserve its
    /// trust ordering, and the two composite shares must sum to 1.
    pub fn validate(&self) -> Result<(), String> {
        let in_unit = |name: &str, v: f64| -> Result<(), String> {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{} must be within [0.0, 1.0], got {}", name, v));
            }
            Ok(())
        };

        in_unit("source_weights.regulatory_label", self.source_weights.regulatory_label)?;
        in_unit("source_weights.clinical_trial", self.source_weights.clinical_trial)?;
        in_unit("source_weights.publication", self.source_weights.publication)?;
        in_unit("level_weights.high", self.level_weights.high)?;
        in_unit("level_weights.medium", self.level_weights.medium)?;
        in_unit("level_weights.low", self.level_weights.low)?;
        in_unit("study_weights.rct", self.study_weights.rct)?;
        in_unit("study_weights.pharmacokinetic", self.study_weights.pharmacokinetic)?;
        in_unit("study_weights.observational", self.study_weights.observational)?;
        in_unit("study_weights.in_vitro", self.study_weights.in_vitro)?;
        in_unit("study_weights.case_report", self.study_weights.case_report)?;
        in_unit("study_weights.unknown", self.study_weights.unknown)?;
        in_unit("quality_share", self.quality_share)?;
        in_unit("confidence_share", self.confidence_share)?;

        if self.source_weights.regulatory_label < self.source_weights.clinical_trial
            || self.source_weights.clinical_trial < self.source_weights.publication
        {
            return Err("source weights must not invert the trust hierarchy".to_string());
        }
        if self.level_weights.high < self.level_weights.medium
            || self.level_weights.medium < self.level_weights.low
        {
            return Err("level weights must not invert the evidence ordering".to_string());
        }
        if self.study_weights.rct < self.study_weights.pharmacokinetic
            || self.study_weights.pharmacokinetic < self.study_weights.observational
            || self.study_weights.observational < self.study_weights.in_vitro
            || self.study_weights.in_vitro < self.study_weights.case_report
            || self.study_weights.case_report < self.study_weights.unknown
        {
            return Err("study weights must not invert the design ordering".to_string());
        }

        let share_sum = self.quality_share + self.confidence_share;
        if (share_sum - 1.0).abs() > 1e-6 {
            return Err(format!(
                "quality_share and confidence_share must sum to 1.0, got {}",
                share_sum
            ));
        }

        Ok(())
    }
}

/// Whether a mechanism string counts as known for scoring purposes
///
/// Placeholder values the standardizer leaves behind ("unknown", empty) do
/// not earn the mechanism bonus.
pub fn mechanism_is_known(mechanism: &str) -> bool {
    let trimmed = mechanism.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("unknown")
}

/// Compute the quality score for a record
///
/// quality = source_weight * 30 + level_weight * 30 + study_weight * 20
///         + 5 * severity_rank
///         + 10 if the mechanism is known
///         + 5 if any canonical pathway was captured
pub fn quality_score(record: &EvidenceRecord, config: &ScoringConfig) -> f64 {
    let mut score = config.source_weights.weight(record.source_type) * SOURCE_SCALE;
    score += config.level_weights.weight(record.evidence.level) * LEVEL_SCALE;
    score += config.study_weights.weight(record.evidence.study_type) * STUDY_SCALE;
    score += f64::from(record.interaction.severity.rank()) * SEVERITY_STEP;

    if mechanism_is_known(&record.interaction.mechanism) {
        score += MECHANISM_BONUS;
    }
    if !record.interaction.pathways.is_empty() {
        score += PATHWAY_BONUS;
    }

    score
}

/// Compute the composite score for a record
///
/// composite = round(quality_share * quality + confidence_share * confidence)
pub fn composite_score(record: &EvidenceRecord, config: &ScoringConfig) -> f64 {
    let quality = quality_score(record, config);
    blend(quality, record.evidence.confidence, config)
}

/// Compute both scores and store them on the record
///
/// The merger calls this after every merge so stored scores never go stale.
pub fn apply_scores(record: &mut EvidenceRecord, config: &ScoringConfig) {
    let quality = quality_score(record, config);
    let composite = blend(quality, record.evidence.confidence, config);
    record.evidence.quality_score = Some(quality);
    record.evidence.composite_score = Some(composite);
}

fn blend(quality: f64, confidence: u8, config: &ScoringConfig) -> f64 {
    (config.quality_share * quality + config.confidence_share * f64::from(confidence)).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::minimal_record;
    use crate::Severity;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_hierarchy() {
        let mut config = ScoringConfig::default();
        config.source_weights.publication = 1.0;
        config.source_weights.regulatory_label = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_study_ordering() {
        let mut config = ScoringConfig::default();
        config.study_weights.case_report = 0.95;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_shares() {
        let mut config = ScoringConfig::default();
        config.quality_share = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_quality_score_known_value() {
        let record = minimal_record("a", "b");
        let config = ScoringConfig::default();

        // publication 0.6 * 30 = 18, medium 0.6 * 30 = 18,
        // observational 0.7 * 20 = 14, moderate rank 1 * 5 = 5,
        // mechanism known + pathways present = 15 => 70
        let quality = quality_score(&record, &config);
        assert!((quality - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_composite_score_known_value() {
        let record = minimal_record("a", "b");
        let config = ScoringConfig::default();

        // 0.7 * 70 + 0.3 * 65 = 49 + 19.5 = 68.5, rounds to 69
        let composite = composite_score(&record, &config);
        assert_eq!(composite, 69.0);
    }

    #[test]
    fn test_unknown_mechanism_earns_no_bonus() {
        let config = ScoringConfig::default();
        let mut record = minimal_record("a", "b");
        let with_mechanism = quality_score(&record, &config);

        record.interaction.mechanism = "unknown".to_string();
        let without_mechanism = quality_score(&record, &config);

        assert!((with_mechanism - without_mechanism - MECHANISM_BONUS).abs() < 1e-9);
    }

    #[test]
    fn test_apply_scores_fills_both_fields() {
        let config = ScoringConfig::default();
        let mut record = minimal_record("a", "b");
        assert!(record.evidence.quality_score.is_none());

        apply_scores(&mut record, &config);

        assert_eq!(record.evidence.quality_score, Some(70.0));
        assert_eq!(record.evidence.composite_score, Some(69.0));
    }

    #[test]
    fn test_severity_raises_quality() {
        let config = ScoringConfig::default();
        let mut record = minimal_record("a", "b");

        record.interaction.severity = Severity::Minor;
        let minor = quality_score(&record, &config);

        record.interaction.severity = Severity::Contraindicated;
        let contraindicated = quality_score(&record, &config);

        assert!((contraindicated - minor - 3.0 * SEVERITY_STEP).abs() < 1e-9);
    }
}
