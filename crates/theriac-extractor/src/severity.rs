//! Severity assignment from textual cues and measured exposure changes

use theriac_domain::{PkDirection, Pharmacokinetics, Severity};

use crate::config::EscalationThresholds;
use crate::lexicon::Lexicon;

/// Assign a severity grade to a text unit
///
/// The first matching lexicon cue sets the base grade; units without any
/// cue default to moderate. A measured AUC increase can then escalate the
/// grade (never lower it): past the major threshold the unit is at least
/// major, past the moderate threshold at least moderate. Decreases never
/// escalate, exposure loss is a separate clinical problem from toxicity.
pub fn assign_severity(
    text_lower: &str,
    pk: Option<&Pharmacokinetics>,
    lexicon: &Lexicon,
    thresholds: &EscalationThresholds,
) -> Severity {
    let mut severity = lexicon
        .severity_from_cues(text_lower)
        .unwrap_or(Severity::Moderate);

    if let Some(auc) = pk.and_then(|p| p.auc_change.as_ref()) {
        if auc.direction == PkDirection::Increase {
            if auc.percent > thresholds.major_auc_increase_pct {
                severity = severity.max(Severity::Major);
            } else if auc.percent > thresholds.moderate_auc_increase_pct {
                severity = severity.max(Severity::Moderate);
            }
        }
    }

    severity
}

/// Standard clinical significance phrasing for a severity grade
pub fn clinical_significance(severity: Severity) -> String {
    match severity {
        Severity::Contraindicated => "combination is contraindicated",
        Severity::Major => "clinically significant interaction, monitor closely or adjust dose",
        Severity::Moderate => "monitor therapy when used in combination",
        Severity::Minor => "minimal clinical relevance expected",
    }
    .to_string()
}
