//! Field standardization for evidence records
//!
//! The standardizer is a pure function over one record: it canonicalizes
//! free-text fields against the vocabulary tables and drops records that
//! are structurally unusable. Dropping is a data-quality outcome, never an
//! error; callers count the drops, they do not handle failures.

use std::collections::BTreeSet;

use theriac_domain::{EvidenceLevel, EvidenceRecord, Severity};
use tracing::debug;

use crate::tables::StandardizerTables;

/// Canonicalizes record fields against the vocabulary tables
pub struct Standardizer {
    tables: StandardizerTables,
}

impl Standardizer {
    /// Create a standardizer with the given tables
    pub fn new(tables: StandardizerTables) -> Self {
        Self { tables }
    }

    /// Create a standardizer with the default vocabulary
    pub fn default_tables() -> Self {
        Self::new(StandardizerTables::default())
    }

    /// Standardize one record, or drop it
    ///
    /// Drug names are cleaned up, the mechanism is mapped to its canonical
    /// category (unmatched text is preserved verbatim), and pathway tokens
    /// are mapped to canonical codes. Returns `None` when the record is
    /// structurally unusable afterwards: an empty drug name or no mechanism
    /// text. Severity and evidence level are closed enumerations, so they
    /// cannot be absent here; free-text grades are mapped at the import
    /// boundary via [`Standardizer::severity_from_text`] and
    /// [`Standardizer::level_from_text`].
    pub fn standardize(&self, mut record: EvidenceRecord) -> Option<EvidenceRecord> {
        record.drug_a.raw_name = self.normalize_drug_name(&record.drug_a.raw_name);
        record.drug_b.raw_name = self.normalize_drug_name(&record.drug_b.raw_name);
        record.interaction.mechanism = self.canonical_mechanism(&record.interaction.mechanism);
        record.interaction.pathways = self.canonical_pathways(&record.interaction.pathways);

        if record.drug_a.raw_name.is_empty() || record.drug_b.raw_name.is_empty() {
            debug!("Dropping record {}: empty drug name after cleanup", record.id);
            return None;
        }
        if record.interaction.mechanism.is_empty() {
            debug!("Dropping record {}: no mechanism text", record.id);
            return None;
        }

        Some(record)
    }

    /// Map a free-text severity phrase to a canonical grade
    ///
    /// Lookup is case- and whitespace-insensitive. Unknown or empty phrases
    /// default to moderate, the conservative middle grade.
    pub fn severity_from_text(&self, text: &str) -> Severity {
        let phrase = normalize_phrase(text);
        if phrase.is_empty() {
            return Severity::Moderate;
        }
        self.tables
            .severity_synonym(&phrase)
            .or_else(|| Severity::parse(&phrase))
            .unwrap_or(Severity::Moderate)
    }

    /// Map a free-text evidence strength phrase to a canonical level
    ///
    /// Unknown or empty phrases default to medium, the middle grade.
    pub fn level_from_text(&self, text: &str) -> EvidenceLevel {
        let phrase = normalize_phrase(text);
        if phrase.is_empty() {
            return EvidenceLevel::Medium;
        }
        self.tables
            .level_synonym(&phrase)
            .or_else(|| EvidenceLevel::parse(&phrase))
            .unwrap_or(EvidenceLevel::Medium)
    }

    /// Clean up a drug name for resolution and display
    ///
    /// Lower-cases and trims the name, removes dosage-form words, and
    /// expands known shorthand names.
    pub fn normalize_drug_name(&self, name: &str) -> String {
        let lowered = name.trim().to_lowercase();
        let kept: Vec<&str> = lowered
            .split_whitespace()
            .filter(|token| !self.tables.is_dosage_form(token))
            .collect();
        let cleaned = kept.join(" ");

        match self.tables.abbreviation(&cleaned) {
            Some(expansion) => expansion.to_string(),
            None => cleaned,
        }
    }

    fn canonical_mechanism(&self, mechanism: &str) -> String {
        let trimmed = mechanism.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        match self.tables.mechanism_category(&trimmed.to_lowercase()) {
            Some(category) => category.to_string(),
            None => trimmed.to_string(),
        }
    }

    fn canonical_pathways(&self, pathways: &BTreeSet<String>) -> BTreeSet<String> {
        let mut canonical = BTreeSet::new();
        for entry in pathways {
            // Imported records sometimes carry whole lists in one entry.
            for token in entry.split([',', ';']) {
                let token = token.trim();
                if token.is_empty() {
                    continue;
                }
                match self.tables.canonical_pathway(&token.to_lowercase()) {
                    Some(code) => canonical.insert(code.to_string()),
                    None => canonical.insert(token.to_string()),
                };
            }
        }
        canonical
    }
}

/// Lower-case and collapse internal whitespace for table lookups
fn normalize_phrase(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::resolved_record;

    #[test]
    fn test_canonical_record_passes_through() {
        let standardizer = Standardizer::default_tables();
        let record = resolved_record("11289", "4450");

        let standardized = standardizer.standardize(record.clone()).unwrap();

        assert_eq!(standardized.drug_a.raw_name, record.drug_a.raw_name);
        assert_eq!(standardized.interaction.mechanism, record.interaction.mechanism);
        assert_eq!(standardized.interaction.pathways, record.interaction.pathways);
    }

    #[test]
    fn test_drug_names_lowercased_and_trimmed() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.drug_a.raw_name = "  Warfarin ".to_string();

        let standardized = standardizer.standardize(record).unwrap();
        assert_eq!(standardized.drug_a.raw_name, "warfarin");
    }

    #[test]
    fn test_dosage_forms_stripped() {
        let standardizer = Standardizer::default_tables();

        assert_eq!(
            standardizer.normalize_drug_name("Warfarin Sodium Tablets"),
            "warfarin sodium"
        );
        assert_eq!(standardizer.normalize_drug_name("aspirin oral tablet"), "aspirin");
        assert_eq!(standardizer.normalize_drug_name("vancomycin IV"), "vancomycin");
    }

    #[test]
    fn test_abbreviations_expanded() {
        let standardizer = Standardizer::default_tables();

        assert_eq!(standardizer.normalize_drug_name("5-FU"), "5-fluorouracil");
        // Dosage forms come off before the shorthand lookup.
        assert_eq!(standardizer.normalize_drug_name("MTX tablets"), "methotrexate");
    }

    #[test]
    fn test_empty_drug_name_drops_record() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.drug_b.raw_name = "   ".to_string();

        assert!(standardizer.standardize(record).is_none());
    }

    #[test]
    fn test_name_reduced_to_nothing_drops_record() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.drug_a.raw_name = "oral tablets".to_string();

        assert!(standardizer.standardize(record).is_none());
    }

    #[test]
    fn test_missing_mechanism_drops_record() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.interaction.mechanism = String::new();

        assert!(standardizer.standardize(record).is_none());
    }

    #[test]
    fn test_mechanism_mapped_to_canonical_category() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.interaction.mechanism = "Potent CYP3A4 inhibition by the label".to_string();

        let standardized = standardizer.standardize(record).unwrap();
        assert_eq!(standardized.interaction.mechanism, "enzyme inhibition");
    }

    #[test]
    fn test_unmatched_mechanism_preserved_verbatim() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.interaction.mechanism = "novel receptor crosstalk".to_string();

        let standardized = standardizer.standardize(record).unwrap();
        assert_eq!(standardized.interaction.mechanism, "novel receptor crosstalk");
    }

    #[test]
    fn test_pathways_canonicalized_and_deduplicated() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.interaction.pathways = ["cytochrome p450 3a4, p-glycoprotein".to_string(),
            "3a4".to_string()]
        .into_iter()
        .collect();

        let standardized = standardizer.standardize(record).unwrap();
        let pathways: Vec<&str> = standardized
            .interaction
            .pathways
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(pathways, vec!["CYP3A4", "P-GP"]);
    }

    #[test]
    fn test_unmapped_pathways_pass_through() {
        let standardizer = Standardizer::default_tables();
        let mut record = resolved_record("a", "b");
        record.interaction.pathways = ["renal secretion".to_string()].into_iter().collect();

        let standardized = standardizer.standardize(record).unwrap();
        assert!(standardized.interaction.pathways.contains("renal secretion"));
    }

    #[test]
    fn test_severity_from_text() {
        let standardizer = Standardizer::default_tables();

        assert_eq!(standardizer.severity_from_text("Avoid"), Severity::Contraindicated);
        assert_eq!(standardizer.severity_from_text("  use   caution "), Severity::Moderate);
        assert_eq!(standardizer.severity_from_text("major"), Severity::Major);
        assert_eq!(standardizer.severity_from_text(""), Severity::Moderate);
        assert_eq!(standardizer.severity_from_text("gibberish"), Severity::Moderate);
    }

    #[test]
    fn test_level_from_text() {
        let standardizer = Standardizer::default_tables();

        assert_eq!(standardizer.level_from_text("Established"), EvidenceLevel::High);
        assert_eq!(standardizer.level_from_text("probable"), EvidenceLevel::Medium);
        assert_eq!(standardizer.level_from_text("high"), EvidenceLevel::High);
        assert_eq!(standardizer.level_from_text(""), EvidenceLevel::Medium);
        assert_eq!(standardizer.level_from_text("gibberish"), EvidenceLevel::Medium);
    }
}
