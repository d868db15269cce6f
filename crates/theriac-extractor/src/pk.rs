//! Pharmacokinetic change extraction
//!
//! Recognizes quantified AUC, Cmax, and clearance changes in three phrase
//! shapes: parameter-first ("AUC increased by 120%"), amount-first
//! ("a 2.5-fold increase in AUC"), and direction-first ("increased the AUC
//! by 120%"). Fold changes are converted to percent: an n-fold increase is
//! (n-1)*100% and an n-fold decrease is (1 - 1/n)*100%, so a 2-fold rise
//! and a 100% rise land on the same number.

use once_cell::sync::Lazy;
use regex::Regex;

use theriac_domain::{PkChange, PkDirection, Pharmacokinetics};

const DIRECTION_WORDS: &str = "increas\\w*|decreas\\w*|reduc\\w*|elevat\\w*|rais\\w*|rose|ris\\w*|fall\\w*|fell|declin\\w*|diminish\\w*|lower\\w*|higher";

const AMOUNT: &str = "(\\d+(?:\\.\\d+)?)\\s*-?\\s*(%|percent|fold)";

/// Compiled phrase patterns for one pharmacokinetic parameter
struct PkPatterns {
    param_first: Regex,
    amount_first: Regex,
    direction_first: Regex,
}

impl PkPatterns {
    fn new(param: &str) -> Self {
        let param_first = format!(
            r"(?i)\b{param}\b[^.;:]*?\b({DIRECTION_WORDS})\b[^.;:]*?{AMOUNT}"
        );
        let amount_first = format!(
            r"(?i)\b{AMOUNT}\s+({DIRECTION_WORDS})\b[^.;:]*?\b{param}\b"
        );
        let direction_first = format!(
            r"(?i)\b({DIRECTION_WORDS})\b[^.;:]*?\b{param}\b[^.;:]*?{AMOUNT}"
        );
        Self {
            param_first: Regex::new(&param_first).expect("valid regex"),
            amount_first: Regex::new(&amount_first).expect("valid regex"),
            direction_first: Regex::new(&direction_first).expect("valid regex"),
        }
    }

    fn extract(&self, text: &str) -> Option<PkChange> {
        self.extract_param_first(text)
            .or_else(|| self.extract_amount_first(text))
            .or_else(|| self.extract_direction_first(text))
    }

    fn extract_param_first(&self, text: &str) -> Option<PkChange> {
        let caps = self.param_first.captures(text)?;
        let direction = direction_of(caps.get(1)?.as_str())?;
        let amount: f64 = caps.get(2)?.as_str().parse().ok()?;
        let percent = to_percent(amount, caps.get(3)?.as_str(), direction)?;
        Some(PkChange { direction, percent })
    }

    fn extract_amount_first(&self, text: &str) -> Option<PkChange> {
        let caps = self.amount_first.captures(text)?;
        let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
        let unit = caps.get(2)?.as_str().to_string();
        let direction = direction_of(caps.get(3)?.as_str())?;
        let percent = to_percent(amount, &unit, direction)?;
        Some(PkChange { direction, percent })
    }

    fn extract_direction_first(&self, text: &str) -> Option<PkChange> {
        let caps = self.direction_first.captures(text)?;
        let direction = direction_of(caps.get(1)?.as_str())?;
        let amount: f64 = caps.get(2)?.as_str().parse().ok()?;
        let percent = to_percent(amount, caps.get(3)?.as_str(), direction)?;
        Some(PkChange { direction, percent })
    }
}

static AUC_PATTERNS: Lazy<PkPatterns> = Lazy::new(|| PkPatterns::new("AUC"));
static CMAX_PATTERNS: Lazy<PkPatterns> = Lazy::new(|| PkPatterns::new(r"C\s?max"));
static CLEARANCE_PATTERNS: Lazy<PkPatterns> = Lazy::new(|| PkPatterns::new("clearance"));

/// Extract quantified pharmacokinetic changes from a text unit
///
/// Returns `None` when no parameter change was found.
pub fn extract_pharmacokinetics(text: &str) -> Option<Pharmacokinetics> {
    let pk = Pharmacokinetics {
        auc_change: AUC_PATTERNS.extract(text),
        cmax_change: CMAX_PATTERNS.extract(text),
        clearance_change: CLEARANCE_PATTERNS.extract(text),
    };
    if pk.is_empty() {
        None
    } else {
        Some(pk)
    }
}

fn direction_of(word: &str) -> Option<PkDirection> {
    let w = word.to_lowercase();
    if ["increas", "elevat", "rais", "rose", "ris", "higher"]
        .iter()
        .any(|p| w.starts_with(p))
    {
        Some(PkDirection::Increase)
    } else if ["decreas", "reduc", "lower", "diminish", "fell", "fall", "declin"]
        .iter()
        .any(|p| w.starts_with(p))
    {
        Some(PkDirection::Decrease)
    } else {
        None
    }
}

/// Convert a captured amount to a percent change
///
/// Fold amounts at or below zero, and fold increases below 1 (ambiguous
/// phrasing), are rejected.
fn to_percent(amount: f64, unit: &str, direction: PkDirection) -> Option<f64> {
    if !unit.eq_ignore_ascii_case("fold") {
        return Some(amount);
    }
    if amount <= 0.0 {
        return None;
    }
    let percent = match direction {
        PkDirection::Increase => (amount - 1.0) * 100.0,
        PkDirection::Decrease => (1.0 - 1.0 / amount) * 100.0,
    };
    if percent < 0.0 {
        None
    } else {
        Some(percent)
    }
}
