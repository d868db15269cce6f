//! Canonicalization tables driving the standardizer
//!
//! Every table is plain serde-loadable data so deployments can retune the
//! vocabulary without code changes; the defaults ship the clinical
//! vocabulary the engine was built against. Lookups are always done against
//! lower-cased text, so table keys are stored lower-case. Canonical outputs
//! (pathway codes, category names) keep their published casing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use theriac_domain::{EvidenceLevel, Severity};

/// One mechanism category and the phrases that signal it
///
/// Categories are scanned in order; the first category with a matching
/// phrase wins, so more specific entries (transporters) come before generic
/// ones (enzyme inhibition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismCategory {
    /// Canonical category name
    pub category: String,

    /// Lower-case phrases whose presence signals the category
    pub phrases: Vec<String>,
}

/// Canonicalization tables for the standardizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizerTables {
    /// Free-text severity phrases mapped to canonical grades
    pub severity_synonyms: BTreeMap<String, Severity>,

    /// Free-text evidence strength phrases mapped to canonical grades
    pub level_synonyms: BTreeMap<String, EvidenceLevel>,

    /// Mechanism phrase-to-category rules, first match wins
    pub mechanism_categories: Vec<MechanismCategory>,

    /// Enzyme and transporter spellings mapped to canonical pathway codes
    pub pathway_synonyms: BTreeMap<String, String>,

    /// Dosage-form words stripped out of drug names
    pub dosage_forms: Vec<String>,

    /// Shorthand drug names and their expansions
    pub abbreviations: BTreeMap<String, String>,
}

impl StandardizerTables {
    /// Canonical severity for a normalized phrase, if the table knows it
    pub fn severity_synonym(&self, phrase_lower: &str) -> Option<Severity> {
        self.severity_synonyms.get(phrase_lower).copied()
    }

    /// Canonical evidence level for a normalized phrase, if the table knows it
    pub fn level_synonym(&self, phrase_lower: &str) -> Option<EvidenceLevel> {
        self.level_synonyms.get(phrase_lower).copied()
    }

    /// Category of the first rule with a phrase contained in the text
    pub fn mechanism_category(&self, text_lower: &str) -> Option<&str> {
        self.mechanism_categories
            .iter()
            .find(|rule| rule.phrases.iter().any(|p| text_lower.contains(p.as_str())))
            .map(|rule| rule.category.as_str())
    }

    /// Canonical pathway code for an enzyme or transporter spelling
    pub fn canonical_pathway(&self, token_lower: &str) -> Option<&str> {
        self.pathway_synonyms.get(token_lower).map(String::as_str)
    }

    /// True when the (lower-cased) token is a dosage-form word
    pub fn is_dosage_form(&self, token_lower: &str) -> bool {
        self.dosage_forms.iter().any(|form| form == token_lower)
    }

    /// Expansion for a shorthand drug name, if the table knows it
    pub fn abbreviation(&self, name_lower: &str) -> Option<&str> {
        self.abbreviations.get(name_lower).map(String::as_str)
    }

    /// Load tables from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize the tables to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for StandardizerTables {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let text_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            severity_synonyms: [
                ("avoid", Severity::Contraindicated),
                ("avoid combination", Severity::Contraindicated),
                ("do not combine", Severity::Contraindicated),
                ("do not use", Severity::Contraindicated),
                ("contraindication", Severity::Contraindicated),
                ("serious", Severity::Major),
                ("severe", Severity::Major),
                ("high", Severity::Major),
                ("caution", Severity::Moderate),
                ("use caution", Severity::Moderate),
                ("use with caution", Severity::Moderate),
                ("monitor", Severity::Moderate),
                ("monitor closely", Severity::Moderate),
                ("monitor therapy", Severity::Moderate),
                ("significant", Severity::Moderate),
                ("mild", Severity::Minor),
                ("minimal", Severity::Minor),
                ("low", Severity::Minor),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),

            level_synonyms: [
                ("strong", EvidenceLevel::High),
                ("established", EvidenceLevel::High),
                ("excellent", EvidenceLevel::High),
                ("good", EvidenceLevel::High),
                ("probable", EvidenceLevel::Medium),
                ("likely", EvidenceLevel::Medium),
                ("fair", EvidenceLevel::Medium),
                ("weak", EvidenceLevel::Low),
                ("theoretical", EvidenceLevel::Low),
                ("possible", EvidenceLevel::Low),
                ("unlikely", EvidenceLevel::Low),
                ("poor", EvidenceLevel::Low),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect(),

            // Same canonical category names the extractor lexicon emits, so
            // mined and imported records land in one vocabulary.
            mechanism_categories: vec![
                MechanismCategory {
                    category: "transporter inhibition".to_string(),
                    phrases: owned(&[
                        "p-glycoprotein",
                        "p-gp",
                        "pgp",
                        "transporter",
                        "efflux",
                        "oatp",
                        "bcrp",
                    ]),
                },
                MechanismCategory {
                    category: "protein binding displacement".to_string(),
                    phrases: owned(&["protein binding", "displacement", "displaces"]),
                },
                MechanismCategory {
                    category: "absorption interference".to_string(),
                    phrases: owned(&["absorption", "chelation", "gastric ph", "gastric emptying"]),
                },
                MechanismCategory {
                    category: "enzyme induction".to_string(),
                    phrases: owned(&["induction", "induces", "inducer", "induce"]),
                },
                MechanismCategory {
                    category: "enzyme inhibition".to_string(),
                    phrases: owned(&[
                        "inhibition",
                        "inhibits",
                        "inhibitor",
                        "inhibit",
                        "cyp",
                        "cytochrome",
                    ]),
                },
                MechanismCategory {
                    category: "distribution interference".to_string(),
                    phrases: owned(&["distribution", "tissue binding"]),
                },
            ],

            pathway_synonyms: text_map(&[
                ("cyp1a2", "CYP1A2"),
                ("cyp2b6", "CYP2B6"),
                ("cyp2c8", "CYP2C8"),
                ("cyp2c9", "CYP2C9"),
                ("cyp2c19", "CYP2C19"),
                ("cyp2d6", "CYP2D6"),
                ("cyp3a4", "CYP3A4"),
                ("cyp3a5", "CYP3A5"),
                ("1a2", "CYP1A2"),
                ("2c9", "CYP2C9"),
                ("2c19", "CYP2C19"),
                ("2d6", "CYP2D6"),
                ("3a4", "CYP3A4"),
                ("cyp 3a4", "CYP3A4"),
                ("cytochrome p450 3a4", "CYP3A4"),
                ("p450 3a4", "CYP3A4"),
                ("cytochrome p450 2c9", "CYP2C9"),
                ("p-gp", "P-GP"),
                ("pgp", "P-GP"),
                ("p-glycoprotein", "P-GP"),
                ("p glycoprotein", "P-GP"),
                ("oatp", "OATP"),
                ("oatp1b1", "OATP1B1"),
                ("oatp1b3", "OATP1B3"),
                ("ugt", "UGT"),
                ("ugt1a1", "UGT1A1"),
                ("bcrp", "BCRP"),
            ]),

            dosage_forms: owned(&[
                "tablet",
                "tablets",
                "capsule",
                "capsules",
                "injection",
                "injectable",
                "oral",
                "iv",
                "intravenous",
                "topical",
                "solution",
                "suspension",
                "syrup",
                "cream",
                "ointment",
                "patch",
            ]),

            abbreviations: text_map(&[
                ("5-fu", "5-fluorouracil"),
                ("mtx", "methotrexate"),
                ("asa", "aspirin"),
                ("hctz", "hydrochlorothiazide"),
                ("inh", "isoniazid"),
                ("azt", "zidovudine"),
                ("tmp-smx", "trimethoprim-sulfamethoxazole"),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_severity_synonyms() {
        let tables = StandardizerTables::default();

        assert_eq!(tables.severity_synonym("avoid"), Some(Severity::Contraindicated));
        assert_eq!(tables.severity_synonym("use caution"), Some(Severity::Moderate));
        assert_eq!(tables.severity_synonym("monitor"), Some(Severity::Moderate));
        assert_eq!(tables.severity_synonym("mild"), Some(Severity::Minor));
        assert_eq!(tables.severity_synonym("no such phrase"), None);
    }

    #[test]
    fn test_default_level_synonyms() {
        let tables = StandardizerTables::default();

        assert_eq!(tables.level_synonym("established"), Some(EvidenceLevel::High));
        assert_eq!(tables.level_synonym("probable"), Some(EvidenceLevel::Medium));
        assert_eq!(tables.level_synonym("theoretical"), Some(EvidenceLevel::Low));
        assert_eq!(tables.level_synonym("no such phrase"), None);
    }

    #[test]
    fn test_mechanism_first_match_wins() {
        let tables = StandardizerTables::default();

        // Mentions both a transporter and inhibition; the transporter rule
        // sits earlier so it decides the category.
        let category = tables.mechanism_category("p-glycoprotein efflux inhibition");
        assert_eq!(category, Some("transporter inhibition"));

        let category = tables.mechanism_category("potent cyp3a4 inhibition");
        assert_eq!(category, Some("enzyme inhibition"));

        assert_eq!(tables.mechanism_category("novel receptor crosstalk"), None);
    }

    #[test]
    fn test_pathway_synonyms() {
        let tables = StandardizerTables::default();

        assert_eq!(tables.canonical_pathway("cytochrome p450 3a4"), Some("CYP3A4"));
        assert_eq!(tables.canonical_pathway("3a4"), Some("CYP3A4"));
        assert_eq!(tables.canonical_pathway("p-glycoprotein"), Some("P-GP"));
        assert_eq!(tables.canonical_pathway("made-up enzyme"), None);
    }

    #[test]
    fn test_dosage_forms_and_abbreviations() {
        let tables = StandardizerTables::default();

        assert!(tables.is_dosage_form("tablets"));
        assert!(tables.is_dosage_form("iv"));
        assert!(!tables.is_dosage_form("sodium"));

        assert_eq!(tables.abbreviation("5-fu"), Some("5-fluorouracil"));
        assert_eq!(tables.abbreviation("mtx"), Some("methotrexate"));
        assert_eq!(tables.abbreviation("warfarin"), None);
    }

    #[test]
    fn test_toml_round_trip() {
        let tables = StandardizerTables::default();
        let toml_str = tables.to_toml().unwrap();
        let parsed = StandardizerTables::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.severity_synonyms.len(), tables.severity_synonyms.len());
        assert_eq!(parsed.mechanism_categories.len(), tables.mechanism_categories.len());
        assert_eq!(parsed.severity_synonym("avoid"), Some(Severity::Contraindicated));
        assert_eq!(parsed.canonical_pathway("pgp"), Some("P-GP"));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(StandardizerTables::from_toml("not [valid toml").is_err());
    }
}
