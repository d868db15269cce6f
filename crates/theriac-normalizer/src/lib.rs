//! Theriac Normalizer
//!
//! Standardizes, groups, and merges drug-drug interaction evidence so each
//! drug pair leaves a run as exactly one record.
//!
//! The normalizer provides:
//! - Field standardization: severity and evidence-level phrase mapping,
//!   mechanism categories, canonical pathway codes, drug name cleanup
//! - Grouping by order-independent pair identity
//! - Conflict resolution: strict-maximum severity and evidence level,
//!   set-union mechanisms and pathways, fill-only pharmacokinetics
//! - Run reports with reduction and distribution accounting
//!
//! # Examples
//!
//! ```no_run
//! use theriac_normalizer::{group_by_pair, Merger, Standardizer};
//!
//! let standardizer = Standardizer::default_tables();
//! let merger = Merger::default_config();
//!
//! // Standardize extracted records, group them by pair, merge each group:
//! // let records: Vec<_> = raw.into_iter()
//! //     .filter_map(|r| standardizer.standardize(r))
//! //     .collect();
//! // let merged = merger.merge_all(group_by_pair(records))?;
//! ```

#![warn(missing_docs)]

mod error;
mod grouper;
mod merger;
mod report;
mod standardizer;
mod tables;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::NormalizerError;
pub use grouper::group_by_pair;
pub use merger::Merger;
pub use report::{NormalizationReport, HIGH_SCORE_THRESHOLD};
pub use standardizer::Standardizer;
pub use tables::{MechanismCategory, StandardizerTables};
