//! Pharmacokinetic change module - typed quantitative exposure changes

use serde::{Deserialize, Serialize};

/// Direction of a pharmacokinetic parameter change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PkDirection {
    /// Parameter rises when the drugs are combined
    Increase,

    /// Parameter falls when the drugs are combined
    Decrease,
}

/// One quantitative change to a pharmacokinetic parameter
///
/// Percent values are always non-negative; the direction carries the sign.
/// Fold changes are converted at extraction time: an n-fold increase is
/// stored as (n - 1) * 100 percent, so a 3.2-fold AUC rise and a 220% rise
/// are the same value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PkChange {
    /// Direction of the change
    pub direction: PkDirection,

    /// Magnitude as a percentage of baseline
    pub percent: f64,
}

impl PkChange {
    /// An increase by the given percentage
    pub fn increase(percent: f64) -> Self {
        Self {
            direction: PkDirection::Increase,
            percent,
        }
    }

    /// A decrease by the given percentage
    pub fn decrease(percent: f64) -> Self {
        Self {
            direction: PkDirection::Decrease,
            percent,
        }
    }

    /// Signed magnitude: positive for increases, negative for decreases
    pub fn signed_percent(&self) -> f64 {
        match self.direction {
            PkDirection::Increase => self.percent,
            PkDirection::Decrease => -self.percent,
        }
    }
}

/// Quantitative pharmacokinetic findings attached to a record
///
/// All fields are optional; a record carries this struct only when at least
/// one parameter was captured from the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pharmacokinetics {
    /// Change in area under the concentration curve
    pub auc_change: Option<PkChange>,

    /// Change in peak concentration
    pub cmax_change: Option<PkChange>,

    /// Change in clearance
    pub clearance_change: Option<PkChange>,
}

impl Pharmacokinetics {
    /// True when no parameter was captured
    pub fn is_empty(&self) -> bool {
        self.auc_change.is_none() && self.cmax_change.is_none() && self.clearance_change.is_none()
    }

    /// Fill parameters this struct lacks from another observation
    ///
    /// Used by the merger: the base record keeps its own values and only
    /// adopts parameters it has no measurement for.
    pub fn fill_missing_from(&mut self, other: &Pharmacokinetics) {
        if self.auc_change.is_none() {
            self.auc_change = other.auc_change;
        }
        if self.cmax_change.is_none() {
            self.cmax_change = other.cmax_change;
        }
        if self.clearance_change.is_none() {
            self.clearance_change = other.clearance_change;
        }
    }
}
