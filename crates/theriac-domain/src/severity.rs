//! Severity module - clinical severity grades for an interaction

use serde::{Deserialize, Serialize};

/// Clinical severity of a drug-drug interaction
///
/// Severity is a closed enumeration with a total order so that merge policy
/// can take a strict maximum across conflicting sources:
/// minor < moderate < major < contraindicated.
///
/// Free-text severity phrases ("avoid combination", "use caution") are mapped
/// into this enumeration at the standardization boundary; inside the domain a
/// record always carries a member of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Clinically minor, usually no intervention required
    Minor,

    /// Clinically relevant, monitoring or dose adjustment advised
    Moderate,

    /// Serious outcome possible, combination generally discouraged
    Major,

    /// Combination must not be used
    Contraindicated,
}

impl Severity {
    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Major => "major",
            Severity::Contraindicated => "contraindicated",
        }
    }

    /// Parse a severity from its canonical name (internal use)
    ///
    /// Only exact enumeration names match here; synonym handling lives in
    /// the standardizer tables.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "minor" => Some(Severity::Minor),
            "moderate" => Some(Severity::Moderate),
            "major" => Some(Severity::Major),
            "contraindicated" => Some(Severity::Contraindicated),
            _ => None,
        }
    }

    /// Numeric rank for scoring and merge comparisons (minor = 0)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Minor => 0,
            Severity::Moderate => 1,
            Severity::Major => 2,
            Severity::Contraindicated => 3,
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid severity: {}", s))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
