//! Theriac Gatekeeper
//!
//! Evaluates evidence records for structural validity and quality.
//!
//! The gatekeeper provides:
//! - Structural validation (resolved drug identifiers, mechanism text,
//!   source identity) with explained rejections
//! - Quality filtering of merged evidence against configurable composite
//!   score and confidence floors
//! - Optional mechanism and pathway requirements for curated output
//!
//! # Examples
//!
//! ```no_run
//! use theriac_gatekeeper::{FilterConfig, QualityFilter, Validator};
//!
//! let validator = Validator::new();
//! let filter = QualityFilter::new(FilterConfig::default());
//!
//! // Validate records before grouping, filter merged evidence after
//! // scoring:
//! // let outcome = validator.partition(records);
//! // let filtered = filter.apply(merged);
//! ```

#![warn(missing_docs)]

mod config;
mod filter;
mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::FilterConfig;
pub use filter::{FilterOutcome, FilterReason, FilteredRecord, QualityFilter};
pub use validator::{
    InvalidRecord, RejectionReason, ValidationOutcome, ValidationResult, ValidationStatus,
    Validator,
};
