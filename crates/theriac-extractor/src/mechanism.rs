//! Mechanism, pathway, and effect extraction from text units

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use theriac_domain::{PkDirection, Pharmacokinetics};

use crate::lexicon::Lexicon;

/// Mechanism string recorded when no rule matched
pub const UNKNOWN_MECHANISM: &str = "unknown";

static CYP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bCYP\s?-?([1-9][A-Z][0-9]{1,2})\b").expect("valid regex"));

static CYTOCHROME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bcytochrome\s+P-?450\s+([1-9][A-Z][0-9]{1,2})\b").expect("valid regex")
});

static PGP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bP-?gp\b|\bP-glycoprotein\b").expect("valid regex"));

static OATP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bOATP(?:[0-9][A-Z][0-9])?\b").expect("valid regex"));

static UGT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bUGT(?:[0-9]A[0-9]{1,2})?\b").expect("valid regex"));

/// Categorize the interaction mechanism described in a text unit
///
/// Scans the lexicon's rules in order and returns the first category whose
/// keywords appear; [`UNKNOWN_MECHANISM`] when nothing matches.
pub fn detect_mechanism(text_lower: &str, lexicon: &Lexicon) -> String {
    lexicon
        .mechanism_rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| text_lower.contains(kw.as_str())))
        .map(|rule| rule.category.clone())
        .unwrap_or_else(|| UNKNOWN_MECHANISM.to_string())
}

/// Extract metabolic pathway codes mentioned in a text unit
///
/// Recognizes CYP isoforms in short ("CYP3A4") and long ("cytochrome P450
/// 3A4") form plus the P-gp, OATP, and UGT transporter/enzyme families.
/// Codes come back canonicalized to upper case.
pub fn detect_pathways(text: &str) -> BTreeSet<String> {
    let mut pathways = BTreeSet::new();

    for caps in CYP_RE.captures_iter(text).chain(CYTOCHROME_RE.captures_iter(text)) {
        if let Some(isoform) = caps.get(1) {
            pathways.insert(format!("CYP{}", isoform.as_str().to_uppercase()));
        }
    }
    if PGP_RE.is_match(text) {
        pathways.insert("P-GP".to_string());
    }
    for m in OATP_RE.find_iter(text) {
        pathways.insert(m.as_str().to_uppercase());
    }
    for m in UGT_RE.find_iter(text) {
        pathways.insert(m.as_str().to_uppercase());
    }

    pathways
}

/// Render a short clinical effect description
///
/// Prefers the measured pharmacokinetic direction; falls back to the first
/// outcome keyword found in the text, then to a fixed placeholder.
pub fn derive_effect(text_lower: &str, pk: &Pharmacokinetics, lexicon: &Lexicon) -> String {
    if let Some(auc) = &pk.auc_change {
        return match auc.direction {
            PkDirection::Increase => "increased plasma exposure".to_string(),
            PkDirection::Decrease => "decreased plasma exposure".to_string(),
        };
    }
    if let Some(cmax) = &pk.cmax_change {
        return match cmax.direction {
            PkDirection::Increase => "increased plasma exposure".to_string(),
            PkDirection::Decrease => "decreased plasma exposure".to_string(),
        };
    }
    if let Some(clearance) = &pk.clearance_change {
        return match clearance.direction {
            PkDirection::Decrease => "reduced clearance".to_string(),
            PkDirection::Increase => "increased clearance".to_string(),
        };
    }
    if let Some(keyword) = lexicon
        .effect_keywords
        .iter()
        .find(|kw| text_lower.contains(kw.as_str()))
    {
        return format!("increased risk of {}", keyword);
    }
    "effect not quantified".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use theriac_domain::PkChange;

    #[test]
    fn test_mechanism_first_rule_wins() {
        let lexicon = Lexicon::default();
        // Transporter wording and generic "inhibits" both present; the
        // transporter rule is scanned first
        let text = "verapamil inhibits p-glycoprotein mediated efflux";
        assert_eq!(detect_mechanism(text, &lexicon), "transporter inhibition");
    }

    #[test]
    fn test_mechanism_enzyme_inhibition() {
        let lexicon = Lexicon::default();
        let text = "fluconazole inhibits the metabolism of the substrate";
        assert_eq!(detect_mechanism(text, &lexicon), "enzyme inhibition");
    }

    #[test]
    fn test_mechanism_unknown_when_no_rule_matches() {
        let lexicon = Lexicon::default();
        assert_eq!(detect_mechanism("exposure rose in the cohort", &lexicon), "unknown");
    }

    #[test]
    fn test_pathways_cyp_short_and_long_form() {
        let pathways = detect_pathways("a CYP3A4 substrate also metabolized by cytochrome P450 2D6");
        assert!(pathways.contains("CYP3A4"));
        assert!(pathways.contains("CYP2D6"));
    }

    #[test]
    fn test_pathways_spacing_and_case_variants() {
        let pathways = detect_pathways("cyp 3a4 and CYP-2C9 were both involved");
        assert!(pathways.contains("CYP3A4"));
        assert!(pathways.contains("CYP2C9"));
    }

    #[test]
    fn test_pathways_transporter_families() {
        let pathways = detect_pathways("an inhibitor of P-gp and OATP1B1, also a UGT1A1 substrate");
        assert!(pathways.contains("P-GP"));
        assert!(pathways.contains("OATP1B1"));
        assert!(pathways.contains("UGT1A1"));
    }

    #[test]
    fn test_pathways_empty_for_plain_text() {
        assert!(detect_pathways("no enzymes were mentioned here").is_empty());
    }

    #[test]
    fn test_effect_prefers_pk_direction() {
        let lexicon = Lexicon::default();
        let pk = Pharmacokinetics {
            auc_change: Some(PkChange::increase(120.0)),
            ..Default::default()
        };
        // The bleeding keyword is present but AUC wins
        let effect = derive_effect("increased bleeding was observed", &pk, &lexicon);
        assert_eq!(effect, "increased plasma exposure");
    }

    #[test]
    fn test_effect_falls_back_to_outcome_keyword() {
        let lexicon = Lexicon::default();
        let pk = Pharmacokinetics::default();
        let effect = derive_effect("a higher rate of bleeding was observed", &pk, &lexicon);
        assert_eq!(effect, "increased risk of bleeding");
    }

    #[test]
    fn test_effect_placeholder_when_nothing_found() {
        let lexicon = Lexicon::default();
        let pk = Pharmacokinetics::default();
        assert_eq!(
            derive_effect("the combination was studied", &pk, &lexicon),
            "effect not quantified"
        );
    }
}
