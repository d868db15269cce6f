//! Source type module - provenance tiers for evidence records

use serde::{Deserialize, Serialize};

/// Kind of source an evidence record was extracted from
///
/// Source types form a trust hierarchy used by the quality scorer:
/// regulatory labels outrank trial registry entries, which outrank
/// mined literature. The concrete weights live in
/// [`crate::scoring::ScoringConfig`] and are configurable; the ordering
/// here is part of the domain model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Biomedical literature (mined publications)
    Publication,

    /// Clinical trial registry entry
    ClinicalTrial,

    /// Structured regulatory product label
    RegulatoryLabel,
}

impl SourceType {
    /// Get the source type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Publication => "publication",
            SourceType::ClinicalTrial => "clinical_trial",
            SourceType::RegulatoryLabel => "regulatory_label",
        }
    }

    /// Parse a source type from its canonical name (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "publication" => Some(SourceType::Publication),
            "clinical_trial" => Some(SourceType::ClinicalTrial),
            "regulatory_label" => Some(SourceType::RegulatoryLabel),
            _ => None,
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid source type: {}", s))
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
