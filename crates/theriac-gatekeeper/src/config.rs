//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for the quality filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Minimum composite score an accepted record must reach
    pub min_composite_score: f64,

    /// Minimum extraction confidence an accepted record must reach
    pub min_confidence: u8,

    /// Reject records whose mechanism is still the unknown placeholder
    pub require_known_mechanism: bool,

    /// Reject records with no canonical pathway
    pub require_pathways: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_composite_score: 30.0,
            min_confidence: 40,
            require_known_mechanism: false,
            require_pathways: false,
        }
    }
}

impl FilterConfig {
    /// Create a permissive configuration that keeps nearly everything
    ///
    /// Useful for exploratory runs where reviewers want to see the long
    /// tail before deciding on thresholds.
    pub fn permissive() -> Self {
        Self {
            min_composite_score: 0.0,
            min_confidence: 0,
            require_known_mechanism: false,
            require_pathways: false,
        }
    }

    /// Create a strict configuration for curated output
    pub fn strict() -> Self {
        Self {
            min_composite_score: 50.0,
            min_confidence: 60,
            require_known_mechanism: true,
            require_pathways: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=110.0).contains(&self.min_composite_score) {
            return Err(format!(
                "min_composite_score must be within [0.0, 110.0], got {}",
                self.min_composite_score
            ));
        }
        if self.min_confidence > 100 {
            return Err(format!(
                "min_confidence must be within [0, 100], got {}",
                self.min_confidence
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FilterConfig::default();
        assert_eq!(config.min_composite_score, 30.0);
        assert_eq!(config.min_confidence, 40);
        assert!(!config.require_known_mechanism);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_permissive_config() {
        let config = FilterConfig::permissive();
        assert_eq!(config.min_composite_score, 0.0);
        assert_eq!(config.min_confidence, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = FilterConfig::strict();
        assert!(config.require_known_mechanism);
        assert_eq!(config.min_confidence, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut config = FilterConfig::default();
        config.min_composite_score = 200.0;
        assert!(config.validate().is_err());

        let mut config = FilterConfig::default();
        config.min_confidence = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FilterConfig::strict();
        let toml_str = config.to_toml().unwrap();
        let parsed = FilterConfig::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.min_composite_score, config.min_composite_score);
        assert_eq!(parsed.min_confidence, config.min_confidence);
        assert_eq!(parsed.require_known_mechanism, config.require_known_mechanism);
    }

    #[test]
    fn test_from_toml_rejects_invalid_values() {
        let toml_str = r#"
            min_composite_score = 500.0
            min_confidence = 40
            require_known_mechanism = false
            require_pathways = false
        "#;
        assert!(FilterConfig::from_toml(toml_str).is_err());
    }
}
