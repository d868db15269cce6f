//! Study classification and extraction-stage confidence scoring

use once_cell::sync::Lazy;
use regex::Regex;

use theriac_domain::{EvidenceLevel, StudyType};

use crate::config::ExtractorConfig;
use crate::lexicon::Lexicon;

static N_EQ_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bn\s*=\s*(\d{1,7})\b").expect("valid regex"));

static COHORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,7})\s+(?:healthy\s+)?(?:patients|subjects|participants|volunteers)\b")
        .expect("valid regex")
});

static SIG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bp\s*([<=>])\s*(0?\.\d+)").expect("valid regex"));

/// Classify the study design behind a text unit
///
/// Declared publication types settle the question when they carry a design
/// name; otherwise text cues decide, scanned from strongest design down:
/// randomization, then pharmacokinetic measurement, then in-vitro systems,
/// then case reports, then observational designs.
pub fn classify_study(publication_types: &[String], text_lower: &str) -> StudyType {
    for declared in publication_types {
        let declared = declared.to_lowercase();
        if declared.contains("randomized") || declared.contains("randomised") {
            return StudyType::Rct;
        }
        if declared.contains("case report") {
            return StudyType::CaseReport;
        }
        if declared.contains("observational") {
            return StudyType::Observational;
        }
    }

    if text_lower.contains("randomized")
        || text_lower.contains("randomised")
        || text_lower.contains("double-blind")
    {
        StudyType::Rct
    } else if text_lower.contains("pharmacokinetic")
        || text_lower.contains("auc")
        || text_lower.contains("crossover study")
    {
        StudyType::Pharmacokinetic
    } else if text_lower.contains("in vitro")
        || text_lower.contains("microsome")
        || text_lower.contains("hepatocyte")
    {
        StudyType::InVitro
    } else if text_lower.contains("case report") || text_lower.contains("we report a case") {
        StudyType::CaseReport
    } else if text_lower.contains("cohort")
        || text_lower.contains("case-control")
        || text_lower.contains("retrospective")
        || text_lower.contains("observational")
    {
        StudyType::Observational
    } else {
        StudyType::Unknown
    }
}

/// Map a study design to an evidence level
///
/// Randomized and pharmacokinetic studies are high; observational studies
/// reach high only when published in a high-tier venue; case reports are
/// low; everything else is medium.
pub fn assign_evidence_level(
    study: StudyType,
    journal: Option<&str>,
    lexicon: &Lexicon,
) -> EvidenceLevel {
    match study {
        StudyType::Rct | StudyType::Pharmacokinetic => EvidenceLevel::High,
        StudyType::Observational => {
            if journal.is_some_and(|j| lexicon.is_high_tier_venue(j)) {
                EvidenceLevel::High
            } else {
                EvidenceLevel::Medium
            }
        }
        StudyType::CaseReport => EvidenceLevel::Low,
        StudyType::InVitro | StudyType::Unknown => EvidenceLevel::Medium,
    }
}

/// Score extraction confidence for a text unit
///
/// Additive over the configured weights, capped at 100.
pub fn compute_confidence(
    study: StudyType,
    mechanism_known: bool,
    high_tier_venue: bool,
    text_len: usize,
    has_pk_data: bool,
    config: &ExtractorConfig,
) -> u8 {
    let weights = &config.confidence;
    let mut score = u32::from(weights.base);

    score += u32::from(match study {
        StudyType::Rct => weights.rct,
        StudyType::Pharmacokinetic => weights.pharmacokinetic,
        StudyType::Observational => weights.observational,
        StudyType::InVitro | StudyType::CaseReport | StudyType::Unknown => 0,
    });
    if mechanism_known {
        score += u32::from(weights.mechanism);
    }
    if high_tier_venue {
        score += u32::from(weights.venue);
    }
    if text_len >= config.long_text_min_chars {
        score += u32::from(weights.long_text);
    }
    if has_pk_data {
        score += u32::from(weights.pk_data);
    }

    score.min(100) as u8
}

/// Extract the studied population size, if stated
pub fn extract_population(text: &str) -> Option<u32> {
    N_EQ_RE
        .captures(text)
        .or_else(|| COHORT_RE.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract a reported p-value, normalized to "p<0.05" form
pub fn extract_significance(text: &str) -> Option<String> {
    SIG_RE.captures(text).and_then(|caps| {
        let op = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str();
        Some(format!("p{}{}", op, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_beats_text_cues() {
        let declared = vec!["Randomized Controlled Trial".to_string()];
        // The text reads like a case report, but the declared type wins
        let study = classify_study(&declared, "we report a case of myopathy");
        assert_eq!(study, StudyType::Rct);
    }

    #[test]
    fn test_text_cue_classification() {
        let none: Vec<String> = Vec::new();
        assert_eq!(
            classify_study(&none, "a double-blind comparison of the two regimens"),
            StudyType::Rct
        );
        assert_eq!(
            classify_study(&none, "the auc ratio was assessed in a crossover study"),
            StudyType::Pharmacokinetic
        );
        assert_eq!(
            classify_study(&none, "incubation with human liver microsomes"),
            StudyType::InVitro
        );
        assert_eq!(
            classify_study(&none, "we report a case of serotonin syndrome"),
            StudyType::CaseReport
        );
        assert_eq!(
            classify_study(&none, "a retrospective cohort of older adults"),
            StudyType::Observational
        );
        assert_eq!(classify_study(&none, "the two drugs were compared"), StudyType::Unknown);
    }

    #[test]
    fn test_evidence_level_mapping() {
        let lexicon = Lexicon::default();
        assert_eq!(
            assign_evidence_level(StudyType::Rct, None, &lexicon),
            EvidenceLevel::High
        );
        assert_eq!(
            assign_evidence_level(StudyType::Pharmacokinetic, None, &lexicon),
            EvidenceLevel::High
        );
        assert_eq!(
            assign_evidence_level(StudyType::CaseReport, Some("The Lancet"), &lexicon),
            EvidenceLevel::Low
        );
        assert_eq!(
            assign_evidence_level(StudyType::InVitro, None, &lexicon),
            EvidenceLevel::Medium
        );
    }

    #[test]
    fn test_observational_level_depends_on_venue() {
        let lexicon = Lexicon::default();
        assert_eq!(
            assign_evidence_level(StudyType::Observational, Some("The Lancet"), &lexicon),
            EvidenceLevel::High
        );
        assert_eq!(
            assign_evidence_level(StudyType::Observational, Some("Regional Bulletin"), &lexicon),
            EvidenceLevel::Medium
        );
        assert_eq!(
            assign_evidence_level(StudyType::Observational, None, &lexicon),
            EvidenceLevel::Medium
        );
    }

    #[test]
    fn test_confidence_accumulates_and_caps() {
        let config = ExtractorConfig::default();

        // base 50 + observational 15 = 65
        let score = compute_confidence(StudyType::Observational, false, false, 10, false, &config);
        assert_eq!(score, 65);

        // base 50 + rct 25 + mechanism 15 + venue 10 + long text 5 + pk 10 = 115, capped
        let score = compute_confidence(StudyType::Rct, true, true, 5000, true, &config);
        assert_eq!(score, 100);

        // base 50 with no signals at all
        let score = compute_confidence(StudyType::Unknown, false, false, 10, false, &config);
        assert_eq!(score, 50);
    }

    #[test]
    fn test_population_extraction() {
        assert_eq!(extract_population("enrolled (n = 24) in period one"), Some(24));
        assert_eq!(extract_population("32 healthy volunteers completed"), Some(32));
        assert_eq!(extract_population("120 patients were screened"), Some(120));
        assert_eq!(extract_population("several patients were screened"), None);
    }

    #[test]
    fn test_n_equals_preferred_over_cohort_count() {
        let text = "of 58 patients screened, 24 were dosed (n=24)";
        assert_eq!(extract_population(text), Some(24));
    }

    #[test]
    fn test_significance_extraction() {
        assert_eq!(
            extract_significance("the difference was significant (P < 0.001)"),
            Some("p<0.001".to_string())
        );
        assert_eq!(
            extract_significance("p=0.04 for the primary endpoint"),
            Some("p=0.04".to_string())
        );
        assert_eq!(extract_significance("no statistics were reported"), None);
    }
}
