//! Theriac Pipeline
//!
//! End-to-end facade joining literature mining with evidence normalization.
//!
//! # Overview
//!
//! The pipeline crate wires the stage crates into two engines:
//!
//! - **`NormalizationEngine`**: takes already-extracted evidence records
//!   through standardization, identifier resolution, structural validation,
//!   pair grouping, merging, scoring, and the quality filter, and returns
//!   the accepted evidence with a run report and full accounting
//! - **`MiningEngine`**: adds the literature extractor in front, so one
//!   call mines a drug list from a document repository and normalizes
//!   everything found
//!
//! Data quality never aborts a run. Records that fail a stage land in the
//! rejected bucket with human-readable reasons; the only hard errors are
//! contract violations, extraction-level failures, and export I/O.
//!
//! # Architecture
//!
//! ```text
//! Drug names → Extractor → EvidenceRecords
//!                              │
//!     standardize → resolve → validate → group → merge → filter → report
//!                              │
//!            NormalizationOutcome { accepted, rejected, report, accounting }
//! ```
//!
//! # Usage
//!
//! ## Normalizing extracted records
//!
//! ```no_run
//! use theriac_pipeline::{EngineConfig, NormalizationEngine};
//! use theriac_resolver::MockResolutionService;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut service = MockResolutionService::new();
//! service.add_ingredient("warfarin", "11289");
//! service.add_ingredient("fluconazole", "4450");
//!
//! let engine = NormalizationEngine::new(service, EngineConfig::default());
//! let records = Vec::new(); // e.g. from an earlier extraction run
//! let outcome = engine.normalize(records)?;
//!
//! println!("{}", outcome.report.summary());
//! for rejected in &outcome.rejected {
//!     eprintln!("rejected: {}", rejected.reason());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Mining and normalizing in one run
//!
//! ```no_run
//! use theriac_extractor::{ExtractionOptions, MockDocumentRepository};
//! use theriac_pipeline::{EngineConfig, MiningEngine};
//! use theriac_resolver::MockResolutionService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = MockDocumentRepository::new();
//!     let mut service = MockResolutionService::new();
//!     service.add_ingredient("warfarin", "11289");
//!
//!     let engine = MiningEngine::new(repository, service, EngineConfig::default());
//!     let drugs = vec!["warfarin".to_string()];
//!     let outcome = engine.mine(&drugs, &ExtractionOptions::default()).await?;
//!
//!     println!("{}", outcome.normalization.report.summary());
//!     println!("extraction failures: {}", outcome.extraction_failures.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Exporting a run
//!
//! ```no_run
//! use std::path::Path;
//! use theriac_pipeline::{export, EngineConfig, NormalizationEngine};
//! use theriac_resolver::MockResolutionService;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let engine = NormalizationEngine::new(MockResolutionService::new(), EngineConfig::default());
//! let outcome = engine.normalize(Vec::new())?;
//! export::write_json(&outcome, Path::new("runs/latest.json"))?;
//! export::write_jsonl(&outcome.accepted, Path::new("runs/latest.jsonl"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! One TOML file drives a whole run. Omitted sections keep their defaults;
//! a section that is present must be complete:
//!
//! ```toml
//! [filter]
//! min_composite_score = 30.0
//! min_confidence = 40
//! require_known_mechanism = false
//! require_pathways = false
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
pub mod export;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::EngineConfig;
pub use engine::{MiningEngine, NormalizationEngine};
pub use error::EngineError;
pub use types::{MiningOutcome, NormalizationOutcome, RejectedRecord, RunAccounting};
