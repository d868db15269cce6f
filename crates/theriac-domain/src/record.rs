//! Evidence record module - the fundamental unit of Theriac's knowledge model

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evidence_level::EvidenceLevel;
use crate::pair::PairKey;
use crate::pharmacokinetics::Pharmacokinetics;
use crate::provenance::Provenance;
use crate::severity::Severity;
use crate::source_type::SourceType;
use crate::study_type::StudyType;

/// Unique identifier for an evidence record based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability for run-order queries
/// - 128-bit uniqueness
/// - RFC 9562-standard format with broad ecosystem support
/// - No coordination required for concurrent generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordId(u128);

impl RecordId {
    /// Generate a new UUIDv7-based RecordId
    ///
    /// # Examples
    ///
    /// ```
    /// use theriac_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RecordId from a raw u128 value
    ///
    /// This is primarily for deserialization paths.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a RecordId from a UUIDv7 string
    ///
    /// # Examples
    ///
    /// ```
    /// use theriac_domain::RecordId;
    ///
    /// let id = RecordId::new();
    /// let id_str = id.to_string();
    /// let parsed = RecordId::from_string(&id_str).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUIDv7 string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }

    /// Get the timestamp component of the UUIDv7 (milliseconds since Unix epoch)
    pub fn timestamp(&self) -> u64 {
        // UUIDv7: top 48 bits are Unix millisecond timestamp
        (self.0 >> 80) as u64
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for RecordId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_string(&s)
    }
}

/// One drug mention: the name as found in the source plus its resolved
/// normalized identifier, once resolution has run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugRef {
    /// Name exactly as it appeared in the source
    pub raw_name: String,

    /// Normalized concept identifier, `None` until resolved (or unresolvable)
    pub resolved_id: Option<String>,
}

impl DrugRef {
    /// A drug reference that has not been through resolution yet
    pub fn unresolved(raw_name: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            resolved_id: None,
        }
    }

    /// A drug reference with a known identifier (tests, structured sources)
    pub fn resolved(raw_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            raw_name: raw_name.into(),
            resolved_id: Some(id.into()),
        }
    }

    /// True once a normalized identifier is attached
    pub fn is_resolved(&self) -> bool {
        self.resolved_id.is_some()
    }
}

/// What the interaction does, clinically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionProfile {
    /// Interaction mechanism, canonical category or verbatim text
    pub mechanism: String,

    /// Canonical metabolic pathway codes (enzymes, transporters)
    pub pathways: BTreeSet<String>,

    /// Clinical effect description
    pub effect: String,

    /// Clinical severity grade
    pub severity: Severity,

    /// Free-text clinical significance statement
    pub clinical_significance: String,
}

/// How strong the evidence is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDetail {
    /// Evidence strength grade
    pub level: EvidenceLevel,

    /// Study design behind the claim
    pub study_type: StudyType,

    /// Extraction confidence, 0-100
    pub confidence: u8,

    /// Study population size, when stated
    pub population_size: Option<u32>,

    /// Statistical significance as reported (e.g. "p < 0.001")
    pub statistical_significance: Option<String>,

    /// Quality score, assigned by the scorer
    pub quality_score: Option<f64>,

    /// Composite score (quality + confidence blend), assigned by the scorer
    pub composite_score: Option<f64>,
}

/// How and when a record was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// When the record was extracted (seconds since Unix epoch)
    pub extracted_at: u64,

    /// Extraction method tag (e.g. "lexical", "structured_import")
    pub method: String,

    /// Confidence in the text extraction itself, 0-100
    pub text_confidence: u8,

    /// Source ids folded into this record by the merger
    pub merged_source_ids: Vec<String>,
}

/// An evidence record - one asserted drug-drug interaction claim from one
/// source instance
///
/// Records are created by the extractor (or imported from structured
/// sources), normalized by the standardizer, and read-only afterwards except
/// for the scorer-assigned fields in [`EvidenceDetail`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Kind of source this record came from
    pub source_type: SourceType,

    /// Opaque identifier within the source (PMID, registry id, label id)
    pub source_id: String,

    /// First drug as mentioned by the source
    pub drug_a: DrugRef,

    /// Second drug as mentioned by the source
    pub drug_b: DrugRef,

    /// What the interaction does
    pub interaction: InteractionProfile,

    /// How strong the evidence is
    pub evidence: EvidenceDetail,

    /// Quantitative pharmacokinetic findings, when captured
    pub pharmacokinetics: Option<Pharmacokinetics>,

    /// Bibliographic provenance
    pub provenance: Provenance,

    /// Extraction bookkeeping
    pub extraction: ExtractionMetadata,
}

impl EvidenceRecord {
    /// True once both drug references carry resolved identifiers
    pub fn is_resolved(&self) -> bool {
        self.drug_a.is_resolved() && self.drug_b.is_resolved()
    }

    /// Order-independent pair identity, available once resolved
    pub fn pair_key(&self) -> Option<PairKey> {
        match (&self.drug_a.resolved_id, &self.drug_b.resolved_id) {
            (Some(a), Some(b)) => Some(PairKey::new(a, b)),
            _ => None,
        }
    }
}

/// Final merged evidence for one drug pair
///
/// The only object that survives a normalization run: one record per pair,
/// with conflict resolution applied and scores recomputed, plus accounting
/// of how many sources contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedEvidence {
    /// The merged record
    pub record: EvidenceRecord,

    /// Number of source records folded into this one
    pub sources_count: usize,

    /// Distinct source types that contributed
    pub source_types: BTreeSet<SourceType>,
}

impl MergedEvidence {
    /// Wrap a lone record as merged evidence for its pair
    pub fn single(record: EvidenceRecord) -> Self {
        let mut source_types = BTreeSet::new();
        source_types.insert(record.source_type);
        Self {
            record,
            sources_count: 1,
            source_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_ordering() {
        let id1 = RecordId::from_value(1000);
        let id2 = RecordId::from_value(2000);

        assert!(id1 < id2);
        assert!(id2 > id1);
    }

    #[test]
    fn test_record_id_chronological() {
        // UUIDv7s generated in sequence should be chronologically ordered
        let id1 = RecordId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = RecordId::new();

        assert!(id1 < id2, "Earlier UUIDv7 should be less than later UUIDv7");
        assert!(
            id1.timestamp() <= id2.timestamp(),
            "Timestamps should be ordered"
        );
    }

    #[test]
    fn test_record_id_display_and_parse() {
        let id = RecordId::new();
        let id_str = id.to_string();

        // UUIDv7 strings are 36 characters (8-4-4-4-12 with hyphens)
        assert_eq!(id_str.len(), 36);

        let parsed = RecordId::from_string(&id_str).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_record_id_invalid_string() {
        assert!(RecordId::from_string("not-a-valid-uuid").is_err());
        assert!(RecordId::from_string("").is_err());
    }

    #[test]
    fn test_drug_ref_resolution_state() {
        let unresolved = DrugRef::unresolved("Warfarin");
        assert!(!unresolved.is_resolved());

        let resolved = DrugRef::resolved("Warfarin", "11289");
        assert!(resolved.is_resolved());
        assert_eq!(resolved.resolved_id.as_deref(), Some("11289"));
    }

    #[test]
    fn test_merged_single_counts_one_source() {
        let record = crate::record::test_support::minimal_record("a", "b");
        let merged = MergedEvidence::single(record.clone());

        assert_eq!(merged.sources_count, 1);
        assert_eq!(merged.source_types.len(), 1);
        assert!(merged.source_types.contains(&record.source_type));
    }

    #[test]
    fn test_record_serializes_with_snake_case_enums() {
        let record = crate::record::test_support::minimal_record("11289", "4450");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["source_type"], "publication");
        assert_eq!(json["interaction"]["severity"], "moderate");
        assert_eq!(json["evidence"]["level"], "medium");
        // RecordId serializes as its 36-char UUID string
        assert_eq!(json["id"].as_str().unwrap().len(), 36);
    }
}
