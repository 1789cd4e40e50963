//! Calculator configuration.
//!
//! Stored as JSON; any field missing from the file takes its default value.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quadrature::QuadratureMethod;

/// Errors that can occur while loading or saving a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Limits and defaults applied to every calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    /// Largest segment count a request may ask for; bounds worst-case latency
    pub max_segments: usize,
    /// Segment count used when the caller does not give one
    pub default_segments: usize,
    /// Method used when the caller does not choose one
    pub default_method: QuadratureMethod,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            max_segments: 10_000_000,
            default_segments: 1000,
            default_method: QuadratureMethod::Trapezoid,
        }
    }
}

impl IntegratorConfig {
    /// Check internal consistency: the cap is at least 1 and admits the default
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_segments == 0 {
            return Err(ConfigError::Invalid(
                "max_segments must be at least 1".to_string(),
            ));
        }
        if self.default_segments == 0 || self.default_segments > self.max_segments {
            return Err(ConfigError::Invalid(format!(
                "default_segments must be between 1 and max_segments ({}), got {}",
                self.max_segments, self.default_segments
            )));
        }
        Ok(())
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file and validate
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_valid() {
        assert!(IntegratorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("integrator.json");

        let config = IntegratorConfig {
            max_segments: 5000,
            default_segments: 250,
            default_method: QuadratureMethod::Simpson,
        };
        config.save_to_file(&path).unwrap();

        let loaded = IntegratorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "max_segments": 2000 }"#).unwrap();

        let loaded = IntegratorConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.max_segments, 2000);
        assert_eq!(loaded.default_segments, 1000);
        assert_eq!(loaded.default_method, QuadratureMethod::Trapezoid);
    }

    #[test]
    fn test_inconsistent_config_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "max_segments": 10, "default_segments": 100 }"#).unwrap();

        assert!(matches!(
            IntegratorConfig::load_from_file(&path),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = IntegratorConfig::load_from_file(Path::new("/nonexistent/integrator.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ max_segments: ").unwrap();

        assert!(matches!(
            IntegratorConfig::load_from_file(&path),
            Err(ConfigError::Json(_))
        ));
    }
}
