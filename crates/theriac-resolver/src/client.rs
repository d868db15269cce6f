//! Caching resolver client implementation

use std::collections::HashMap;
use std::sync::Mutex;

use theriac_domain::record::EvidenceRecord;
use theriac_domain::traits::{ResolutionService, ResolvedTerm};
use tracing::{debug, warn};

/// Hit/miss accounting for one resolver instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Lookups answered from the cache
    pub hits: usize,

    /// Lookups that went to the service
    pub misses: usize,
}

/// Caching client over a drug-name resolution service
///
/// Wraps any [`ResolutionService`] with a run-scoped cache keyed by the
/// trimmed, lower-cased name. Successful and failed lookups are both cached
/// so no name is sent to the service twice in one run. Resolution is never
/// fatal: service errors and empty candidate sets yield `None`.
///
/// The cache is `Mutex`-protected, so a resolver shared across tasks stays
/// consistent; entries are only ever inserted whole.
pub struct EntityResolver<S> {
    service: S,
    cache: Mutex<HashMap<String, Option<String>>>,
    stats: Mutex<ResolverStats>,
}

impl<S> EntityResolver<S>
where
    S: ResolutionService,
    S::Error: std::fmt::Display,
{
    /// Create a resolver with an empty cache
    pub fn new(service: S) -> Self {
        Self {
            service,
            cache: Mutex::new(HashMap::new()),
            stats: Mutex::new(ResolverStats::default()),
        }
    }

    /// Resolve a drug name to a normalized identifier
    ///
    /// Candidate preference: the first candidate whose term type is
    /// "ingredient", else the first candidate the service returned.
    pub fn resolve(&self, name: &str) -> Option<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            debug!("Skipping resolution for empty drug name");
            return None;
        }
        let key = trimmed.to_lowercase();

        {
            let cache = self.cache.lock().unwrap();
            if let Some(cached) = cache.get(&key) {
                self.stats.lock().unwrap().hits += 1;
                debug!(name = %trimmed, "Resolution cache hit");
                return cached.clone();
            }
        }

        let outcome = match self.service.resolve(trimmed) {
            Ok(candidates) => {
                let picked = pick_candidate(&candidates);
                if picked.is_none() {
                    debug!(name = %trimmed, "No resolution candidates");
                }
                picked
            }
            Err(e) => {
                warn!(name = %trimmed, error = %e, "Resolution service call failed");
                None
            }
        };

        self.cache.lock().unwrap().insert(key, outcome.clone());
        self.stats.lock().unwrap().misses += 1;

        outcome
    }

    /// Resolve both drug references of a record in place
    ///
    /// References that already carry an identifier are left alone, so the
    /// call is idempotent and structured imports keep their ids.
    pub fn resolve_record(&self, record: &mut EvidenceRecord) {
        if record.drug_a.resolved_id.is_none() {
            record.drug_a.resolved_id = self.resolve(&record.drug_a.raw_name);
        }
        if record.drug_b.resolved_id.is_none() {
            record.drug_b.resolved_id = self.resolve(&record.drug_b.raw_name);
        }
    }

    /// Number of distinct names cached so far
    pub fn cache_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    /// Hit/miss counters for this instance
    pub fn stats(&self) -> ResolverStats {
        *self.stats.lock().unwrap()
    }
}

/// Prefer ingredient-type candidates, fall back to the first one
fn pick_candidate(candidates: &[ResolvedTerm]) -> Option<String> {
    candidates
        .iter()
        .find(|c| c.term_type.eq_ignore_ascii_case("ingredient"))
        .or_else(|| candidates.first())
        .map(|c| c.id.clone())
}
