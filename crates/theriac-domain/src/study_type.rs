//! Study type module - study designs recognized by the classifier

use serde::{Deserialize, Serialize};

/// Study design behind an evidence record
///
/// Classification prefers repository publication-type metadata and falls
/// back to text keywords; records that match nothing stay `Unknown` rather
/// than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyType {
    /// Randomized controlled trial
    Rct,

    /// Dedicated pharmacokinetic study
    Pharmacokinetic,

    /// Cohort or case-control observation
    Observational,

    /// In-vitro or preclinical work
    InVitro,

    /// Single case report or small case series
    CaseReport,

    /// Design could not be determined
    Unknown,
}

impl StudyType {
    /// Get the study type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyType::Rct => "rct",
            StudyType::Pharmacokinetic => "pharmacokinetic",
            StudyType::Observational => "observational",
            StudyType::InVitro => "in_vitro",
            StudyType::CaseReport => "case_report",
            StudyType::Unknown => "unknown",
        }
    }

    /// Parse a study type from its canonical name (internal use)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rct" => Some(StudyType::Rct),
            "pharmacokinetic" => Some(StudyType::Pharmacokinetic),
            "observational" => Some(StudyType::Observational),
            "in_vitro" => Some(StudyType::InVitro),
            "case_report" => Some(StudyType::CaseReport),
            "unknown" => Some(StudyType::Unknown),
            _ => None,
        }
    }
}

impl std::str::FromStr for StudyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid study type: {}", s))
    }
}

impl std::fmt::Display for StudyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
