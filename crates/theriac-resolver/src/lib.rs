//! Theriac Entity Resolver Layer
//!
//! Caching client over a pluggable drug-name resolution service.
//!
//! # Architecture
//!
//! This crate consumes the `ResolutionService` trait from `theriac-domain`.
//! The [`EntityResolver`] wraps any service implementation with a run-scoped
//! cache and a candidate-preference policy; resolution failures are never
//! fatal to callers.
//!
//! # Services
//!
//! - `MockResolutionService`: Deterministic mock for testing
//! - Production terminology services plug in from outside this workspace
//!
//! # Examples
//!
//! ```
//! use theriac_resolver::{EntityResolver, MockResolutionService};
//!
//! let mut service = MockResolutionService::new();
//! service.add_ingredient("warfarin", "11289");
//!
//! let resolver = EntityResolver::new(service);
//! assert_eq!(resolver.resolve("Warfarin"), Some("11289".to_string()));
//! assert_eq!(resolver.resolve("made-up-drug"), None);
//! ```

#![warn(missing_docs)]

pub mod client;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use theriac_domain::traits::{ResolutionService, ResolvedTerm};
use thiserror::Error;

pub use client::{EntityResolver, ResolverStats};

/// Errors that can occur during resolution operations
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Network or API communication error with the terminology service
    #[error("Service error: {0}")]
    Service(String),

    /// Malformed candidate set from the service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Generic error
    #[error("Resolution error: {0}")]
    Other(String),
}

/// Mock resolution service for deterministic testing
///
/// Returns pre-configured candidates without making any network calls.
///
/// # Examples
///
/// ```
/// use theriac_resolver::MockResolutionService;
/// use theriac_domain::traits::ResolutionService;
///
/// let mut service = MockResolutionService::new();
/// service.add_ingredient("simvastatin", "36567");
///
/// let candidates = service.resolve("simvastatin").unwrap();
/// assert_eq!(candidates[0].id, "36567");
/// assert!(service.resolve("unknown drug").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockResolutionService {
    mappings: Arc<Mutex<HashMap<String, Vec<ResolvedTerm>>>>,
    errors: Arc<Mutex<HashSet<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockResolutionService {
    /// Create an empty mock service; unknown names resolve to no candidates
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ingredient-type candidate for a name
    pub fn add_ingredient(&mut self, name: impl Into<String>, id: impl Into<String>) {
        let name = name.into();
        self.add_candidate(
            &name,
            ResolvedTerm {
                id: id.into(),
                term_type: "ingredient".to_string(),
                name: name.clone(),
            },
        );
    }

    /// Register an arbitrary candidate for a name
    pub fn add_candidate(&mut self, name: &str, term: ResolvedTerm) {
        self.mappings
            .lock()
            .unwrap()
            .entry(name.trim().to_lowercase())
            .or_default()
            .push(term);
    }

    /// Configure the service to fail for a specific name
    pub fn add_error(&mut self, name: impl Into<String>) {
        self.errors
            .lock()
            .unwrap()
            .insert(name.into().trim().to_lowercase());
    }

    /// Get the number of times resolve was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl ResolutionService for MockResolutionService {
    type Error = ResolverError;

    fn resolve(&self, name: &str) -> Result<Vec<ResolvedTerm>, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let key = name.trim().to_lowercase();
        if self.errors.lock().unwrap().contains(&key) {
            return Err(ResolverError::Service("mock resolution failure".to_string()));
        }

        Ok(self
            .mappings
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }
}
