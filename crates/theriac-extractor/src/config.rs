//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// AUC-based severity escalation thresholds
///
/// These are heuristic constants carried over from the clinical source
/// material, kept configurable rather than silently retuned. An extracted
/// AUC increase above either threshold raises the record's severity to at
/// least the corresponding grade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EscalationThresholds {
    /// AUC increase (percent) above which severity escalates to major
    pub major_auc_increase_pct: f64,

    /// AUC increase (percent) above which severity escalates to moderate
    pub moderate_auc_increase_pct: f64,
}

impl Default for EscalationThresholds {
    fn default() -> Self {
        Self {
            major_auc_increase_pct: 200.0,
            moderate_auc_increase_pct: 100.0,
        }
    }
}

/// Additive weights for the extraction confidence score
///
/// confidence = base + study bonus + situational bonuses, capped at 100.
/// Heuristic values, kept configurable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    /// Starting score for any record
    pub base: u8,

    /// Bonus for a randomized controlled trial
    pub rct: u8,

    /// Bonus for a dedicated pharmacokinetic study
    pub pharmacokinetic: u8,

    /// Bonus for an observational study
    pub observational: u8,

    /// Bonus when a mechanism was resolved
    pub mechanism: u8,

    /// Bonus when the venue is high tier
    pub venue: u8,

    /// Bonus for long text units
    pub long_text: u8,

    /// Bonus when quantitative PK data was captured
    pub pk_data: u8,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            base: 50,
            rct: 25,
            pharmacokinetic: 20,
            observational: 15,
            mechanism: 15,
            venue: 10,
            long_text: 5,
            pk_data: 10,
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Delay between successive repository fetches (milliseconds)
    pub fetch_delay_ms: u64,

    /// Drugs processed concurrently per bulk batch
    pub batch_size: usize,

    /// Delay between bulk batches (milliseconds)
    pub batch_delay_ms: u64,

    /// Timeout for a single repository call (seconds)
    pub fetch_timeout_secs: u64,

    /// Expiry for the search and metadata caches (hours)
    pub cache_ttl_hours: u64,

    /// Text length (characters) above which the long-text bonus applies
    pub long_text_min_chars: usize,

    /// AUC severity escalation thresholds
    pub escalation: EscalationThresholds,

    /// Confidence score weights
    pub confidence: ConfidenceWeights,
}

impl ExtractorConfig {
    /// Get the inter-fetch delay as a Duration
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    /// Get the inter-batch delay as a Duration
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    /// Get the repository call timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Get the cache expiry as a Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_hours * 3600)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be greater than 0".to_string());
        }
        if self.cache_ttl_hours == 0 {
            return Err("cache_ttl_hours must be greater than 0".to_string());
        }
        if self.escalation.moderate_auc_increase_pct <= 0.0 {
            return Err("moderate_auc_increase_pct must be positive".to_string());
        }
        if self.escalation.major_auc_increase_pct <= self.escalation.moderate_auc_increase_pct {
            return Err(
                "major_auc_increase_pct must exceed moderate_auc_increase_pct".to_string(),
            );
        }
        if self.confidence.base > 100 {
            return Err("confidence base cannot exceed 100".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration tuned for public repository rate limits
    fn default() -> Self {
        Self {
            fetch_delay_ms: 350,
            batch_size: 2,
            batch_delay_ms: 1_000,
            fetch_timeout_secs: 30,
            cache_ttl_hours: 72,
            long_text_min_chars: 1_000,
            escalation: EscalationThresholds::default(),
            confidence: ConfidenceWeights::default(),
        }
    }
}

impl ExtractorConfig {
    /// Polite preset: slower cadence for shared or production repositories
    pub fn polite() -> Self {
        Self {
            fetch_delay_ms: 500,
            batch_size: 1,
            batch_delay_ms: 2_000,
            ..Self::default()
        }
    }

    /// Fast preset: no pacing, for local corpora and tests
    pub fn fast() -> Self {
        Self {
            fetch_delay_ms: 0,
            batch_size: 4,
            batch_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
