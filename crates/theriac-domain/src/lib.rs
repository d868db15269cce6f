//! Theriac Domain Layer
//!
//! This crate contains the core business logic and domain model for Theriac.
//! It stays close to dependency-free and defines the fundamental concepts,
//! value objects, and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Evidence Record**: The fundamental unit - one asserted drug-drug
//!   interaction claim from one source instance
//! - **Pair Key**: Order-independent identity for a drug pair, built from
//!   resolved identifiers
//! - **Severity / Evidence Level**: Closed enumerations with a total order,
//!   so merge policy can take a strict maximum
//! - **Quality / Composite Score**: Weighted scoring model over source tier,
//!   evidence level, study design, and extraction confidence
//!
//! ## Architecture
//!
//! - Pure business logic only (identifiers and serialization are the only
//!   external concerns)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evidence_level;
pub mod pair;
pub mod pharmacokinetics;
pub mod provenance;
pub mod record;
pub mod scoring;
pub mod severity;
pub mod source_type;
pub mod study_type;
pub mod traits;

// Re-exports for convenience
pub use evidence_level::EvidenceLevel;
pub use pair::PairKey;
pub use pharmacokinetics::{Pharmacokinetics, PkChange, PkDirection};
pub use provenance::Provenance;
pub use record::{
    DrugRef, EvidenceDetail, EvidenceRecord, ExtractionMetadata, InteractionProfile,
    MergedEvidence, RecordId,
};
pub use scoring::ScoringConfig;
pub use severity::Severity;
pub use source_type::SourceType;
pub use study_type::StudyType;
pub use traits::{
    DocumentMetadata, DocumentRepository, DocumentSection, ResolutionService, ResolvedTerm,
};
