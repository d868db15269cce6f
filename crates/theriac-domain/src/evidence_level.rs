//! Evidence level module - strength grades for supporting evidence

use serde::{Deserialize, Serialize};

/// Strength of the evidence behind an interaction claim
///
/// A closed, totally ordered enumeration: low < medium < high. Merge policy
/// takes the maximum across sources describing the same pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceLevel {
    /// Anecdotal or preliminary (case reports, in-vitro only)
    Low,

    /// Consistent observational findings or secondary analyses
    Medium,

    /// Controlled trials or dedicated pharmacokinetic studies
    High,
}

impl EvidenceLevel {
    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::Low => "low",
            EvidenceLevel::Medium => "medium",
            EvidenceLevel::High => "high",
        }
    }

    /// Parse a level from its canonical name (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(EvidenceLevel::Low),
            "medium" => Some(EvidenceLevel::Medium),
            "high" => Some(EvidenceLevel::High),
            _ => None,
        }
    }

    /// Numeric rank for scoring comparisons (low = 0)
    pub fn rank(&self) -> u8 {
        match self {
            EvidenceLevel::Low => 0,
            EvidenceLevel::Medium => 1,
            EvidenceLevel::High => 2,
        }
    }
}

impl std::str::FromStr for EvidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid evidence level: {}", s))
    }
}

impl std::fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
