//! Run configuration aggregating the per-stage configs

use serde::{Deserialize, Serialize};
use theriac_domain::ScoringConfig;
use theriac_extractor::ExtractorConfig;
use theriac_gatekeeper::FilterConfig;

/// Configuration for a full mining and normalization run
///
/// Aggregates the stage configs so one TOML file drives a whole run. A
/// section left out of the file keeps its defaults; a section that is
/// present must be complete:
///
/// ```toml
/// [filter]
/// min_composite_score = 30.0
/// min_confidence = 40
/// require_known_mechanism = false
/// require_pathways = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Literature extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Quality floor applied to merged evidence
    #[serde(default)]
    pub filter: FilterConfig,

    /// Quality and composite score weights
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Validate every stage configuration
    pub fn validate(&self) -> Result<(), String> {
        self.extractor.validate()?;
        self.filter.validate()?;
        self.scoring.validate()?;
        Ok(())
    }

    /// Load configuration from TOML string
    ///
    /// Omitted sections fall back to their defaults, so a file holding only
    /// a `[filter]` section is enough.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
