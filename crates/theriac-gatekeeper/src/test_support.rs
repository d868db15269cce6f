//! Record builders shared by unit tests across this crate

use std::collections::BTreeSet;

use theriac_domain::{
    DrugRef, EvidenceDetail, EvidenceLevel, EvidenceRecord, ExtractionMetadata,
    InteractionProfile, Provenance, RecordId, Severity, SourceType, StudyType,
};

/// A structurally complete, resolved publication record for (`id_a`, `id_b`)
pub(crate) fn resolved_record(id_a: &str, id_b: &str) -> EvidenceRecord {
    EvidenceRecord {
        id: RecordId::new(),
        source_type: SourceType::Publication,
        source_id: format!("pmid:{}-{}", id_a, id_b),
        drug_a: DrugRef::resolved(format!("drug {}", id_a), id_a),
        drug_b: DrugRef::resolved(format!("drug {}", id_b), id_b),
        interaction: InteractionProfile {
            mechanism: "enzyme inhibition".to_string(),
            pathways: BTreeSet::from(["CYP3A4".to_string()]),
            effect: "increased plasma exposure".to_string(),
            severity: Severity::Moderate,
            clinical_significance: "monitor closely".to_string(),
        },
        evidence: EvidenceDetail {
            level: EvidenceLevel::Medium,
            study_type: StudyType::Observational,
            confidence: 65,
            population_size: None,
            statistical_significance: None,
            quality_score: None,
            composite_score: None,
        },
        pharmacokinetics: None,
        provenance: Provenance::new(
            "Example interaction study".to_string(),
            "an example snippet".to_string(),
        ),
        extraction: ExtractionMetadata {
            extracted_at: 1_700_000_000,
            method: "lexical".to_string(),
            text_confidence: 65,
            merged_source_ids: Vec::new(),
        },
    }
}
