//! Keyword tables driving lexical extraction
//!
//! Every table here is plain serde-loadable data so deployments can retune
//! the vocabulary without code changes; the defaults ship the clinical
//! vocabulary the engine was built against. Matching is always done against
//! lower-cased text, so table entries are stored lower-case.

use serde::{Deserialize, Serialize};
use theriac_domain::Severity;

/// One mechanism category and the phrases that signal it
///
/// Rules are scanned in order; the first category with a matching phrase
/// wins, so more specific rules (transporters) come before generic ones
/// (enzyme inhibition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanismRule {
    /// Canonical category name
    pub category: String,

    /// Lower-case phrases whose presence signals the category
    pub keywords: Vec<String>,
}

/// Severity cue keywords and the grade they signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityCue {
    /// Lower-case cue phrases
    pub keywords: Vec<String>,

    /// Severity assigned when a cue matches
    pub severity: Severity,
}

/// Keyword tables driving lexical extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Phrases marking a text unit as interaction-relevant
    pub interaction_keywords: Vec<String>,

    /// Generic drug-name stem endings
    pub generic_suffixes: Vec<String>,

    /// Common words never treated as drug mentions
    pub stopwords: Vec<String>,

    /// Venues whose observational studies earn a high evidence level
    pub high_tier_venues: Vec<String>,

    /// Mechanism keyword-to-category rules, first match wins
    pub mechanism_rules: Vec<MechanismRule>,

    /// Severity cue rules, first match wins
    pub severity_cues: Vec<SeverityCue>,

    /// Clinical outcome keywords used to render effect text
    pub effect_keywords: Vec<String>,
}

impl Lexicon {
    /// True when the (lower-cased) text mentions any interaction keyword
    pub fn contains_interaction_keyword(&self, text_lower: &str) -> bool {
        self.interaction_keywords
            .iter()
            .any(|kw| text_lower.contains(kw.as_str()))
    }

    /// True when the (lower-cased) token is a known non-drug word
    pub fn is_stopword(&self, token_lower: &str) -> bool {
        self.stopwords.iter().any(|w| w == token_lower)
    }

    /// True when the journal name matches a high-tier venue entry
    pub fn is_high_tier_venue(&self, journal: &str) -> bool {
        let journal_lower = journal.trim().to_lowercase();
        if journal_lower.is_empty() {
            return false;
        }
        self.high_tier_venues
            .iter()
            .any(|venue| journal_lower == *venue || journal_lower.contains(venue.as_str()))
    }

    /// Severity signaled by the first matching cue, if any
    pub fn severity_from_cues(&self, text_lower: &str) -> Option<Severity> {
        self.severity_cues
            .iter()
            .find(|cue| cue.keywords.iter().any(|kw| text_lower.contains(kw.as_str())))
            .map(|cue| cue.severity)
    }

    /// Load a lexicon from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize the lexicon to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            interaction_keywords: owned(&[
                "drug interaction",
                "drug-drug interaction",
                "interaction with",
                "interacts with",
                "interaction between",
                "coadministration",
                "co-administration",
                "coadministered",
                "co-administered",
                "concomitant",
                "combined with",
                "in combination with",
                "contraindicated with",
                "potentiates",
                "inhibits the metabolism",
            ]),
            generic_suffixes: owned(&[
                "mycin", "cillin", "cycline", "floxacin", "azole", "statin", "prazole",
                "sartan", "olol", "dipine", "pril", "vir", "mab", "tinib", "nib",
                "oxetine", "azepam", "triptan", "profen", "coxib", "parin", "gliptin",
                "glitazone", "setron", "ridone", "afil", "lukast", "platin", "taxel",
                "zolamide", "caine", "barbital", "zosin",
            ]),
            stopwords: owned(&[
                "the", "this", "these", "those", "with", "from", "into", "after",
                "before", "study", "studies", "patients", "patient", "results",
                "methods", "conclusion", "conclusions", "background", "objective",
                "objectives", "purpose", "design", "setting", "outcomes", "review",
                "treatment", "therapy", "effects", "effect", "clinical",
                "trial", "trials", "analysis", "group", "groups", "dose", "doses",
                "dosing", "drug", "drugs", "table", "figure", "university", "hospital",
                "medicine", "journal", "however", "although", "during", "between",
                "significant", "significantly", "increase", "increased", "decrease",
                "decreased", "administration", "coadministration", "coadministered",
                "pretreatment", "plasma", "serum", "blood", "healthy", "subjects",
                "volunteers", "placebo", "baseline", "versus", "respectively",
                "concentration", "concentrations", "exposure", "interaction",
                "interactions", "combination", "concomitant", "metabolism",
                "pharmacokinetics", "pharmacokinetic", "pharmacodynamics",
                "inhibition", "induction", "inhibitor", "inhibitors", "inducer",
                "inducers", "substrate", "substrates", "contraindicated", "severe",
                "monitoring", "management", "adults", "elderly", "children", "women",
                "therefore", "overall",
            ]),
            high_tier_venues: owned(&[
                "clinical pharmacology & therapeutics",
                "clinical pharmacology and therapeutics",
                "clinical pharmacokinetics",
                "british journal of clinical pharmacology",
                "drug metabolism and disposition",
                "the lancet",
                "new england journal of medicine",
                "jama",
                "bmj",
            ]),
            mechanism_rules: vec![
                MechanismRule {
                    category: "transporter inhibition".to_string(),
                    keywords: owned(&[
                        "p-glycoprotein inhibit",
                        "p-gp inhibit",
                        "transporter inhibit",
                        "efflux inhibit",
                        "oatp inhibit",
                        "inhibits p-glycoprotein",
                        "inhibition of p-glycoprotein",
                        "inhibition of oatp",
                    ]),
                },
                MechanismRule {
                    category: "protein binding displacement".to_string(),
                    keywords: owned(&[
                        "protein binding displacement",
                        "displaced from protein binding",
                        "displaces",
                        "albumin binding",
                    ]),
                },
                MechanismRule {
                    category: "absorption interference".to_string(),
                    keywords: owned(&[
                        "decreased absorption",
                        "impaired absorption",
                        "reduced absorption",
                        "chelation",
                        "gastric ph",
                    ]),
                },
                MechanismRule {
                    category: "enzyme induction".to_string(),
                    keywords: owned(&[
                        "induction of",
                        "induces",
                        "inducer of",
                        "increased metabolism",
                        "accelerates the metabolism",
                    ]),
                },
                MechanismRule {
                    category: "enzyme inhibition".to_string(),
                    keywords: owned(&[
                        "inhibition of",
                        "inhibits",
                        "inhibitor of",
                        "decreased metabolism",
                        "blocks the metabolism",
                        "reduced clearance",
                    ]),
                },
                MechanismRule {
                    category: "distribution interference".to_string(),
                    keywords: owned(&["tissue distribution", "volume of distribution"]),
                },
            ],
            severity_cues: vec![
                SeverityCue {
                    keywords: owned(&[
                        "contraindicated",
                        "should not be used",
                        "must not be used",
                        "avoid",
                    ]),
                    severity: Severity::Major,
                },
                SeverityCue {
                    keywords: owned(&["significant", "marked", "markedly", "substantial"]),
                    severity: Severity::Moderate,
                },
                SeverityCue {
                    keywords: owned(&["minor", "slight", "slightly", "modest", "negligible"]),
                    severity: Severity::Minor,
                },
            ],
            effect_keywords: owned(&[
                "bleeding",
                "qt prolongation",
                "torsades de pointes",
                "serotonin syndrome",
                "rhabdomyolysis",
                "myopathy",
                "hypotension",
                "hypertension",
                "hyperkalemia",
                "hypoglycemia",
                "nephrotoxicity",
                "hepatotoxicity",
                "seizure",
                "sedation",
                "respiratory depression",
                "toxicity",
            ]),
        }
    }
}
