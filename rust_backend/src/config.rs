//! Analysis configuration file support.
//!
//! The behavioral knobs that differ between deployments of the capacity
//! analysis tool (default thresholds, the threshold input ceiling exposed to
//! the UI shell, the significant-gap percentage) live here rather than in
//! code, and can be overridden from an `analysis.toml` file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AnalysisError;

/// Tunable settings for an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Default SUSTAIN threshold (aircraft/minute) when neither a reference
    /// table row nor explicit values are available.
    #[serde(default = "default_sustain")]
    pub default_sustain: f64,

    /// Default PEAK threshold (aircraft/minute).
    #[serde(default = "default_peak")]
    pub default_peak: f64,

    /// Upper bound for threshold inputs, published to the UI shell. Some
    /// deployments cap inputs at 5.0 aircraft/minute, others at 30.0.
    #[serde(default = "default_threshold_max")]
    pub threshold_max: f64,

    /// Absolute deviation percentage above which an hourly comparison row
    /// counts as a significant gap.
    #[serde(default = "default_gap_threshold_pct")]
    pub gap_threshold_pct: f64,
}

fn default_sustain() -> f64 {
    0.6
}

fn default_peak() -> f64 {
    1.0
}

fn default_threshold_max() -> f64 {
    5.0
}

fn default_gap_threshold_pct() -> f64 {
    10.0
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_sustain: default_sustain(),
            default_peak: default_peak(),
            threshold_max: default_threshold_max(),
            gap_threshold_pct: default_gap_threshold_pct(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalysisError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config: AnalysisConfig = toml::from_str(&content).map_err(|e| {
            AnalysisError::Config(format!("Failed to parse config file: {}", e))
        })?;

        Ok(config)
    }

    /// Load configuration from the first `analysis.toml` found in the
    /// standard locations, falling back to the built-in defaults.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn load_or_default() -> Self {
        let candidates = [
            PathBuf::from("analysis.toml"),
            PathBuf::from("rust_backend/analysis.toml"),
            PathBuf::from("../analysis.toml"),
        ];

        for candidate in &candidates {
            if candidate.exists() {
                match Self::from_file(candidate) {
                    Ok(config) => return config,
                    Err(e) => {
                        log::warn!("Ignoring {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        log::debug!("No analysis.toml found, using built-in defaults");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.default_sustain, 0.6);
        assert_eq!(config.default_peak, 1.0);
        assert_eq!(config.threshold_max, 5.0);
        assert_eq!(config.gap_threshold_pct, 10.0);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            default_sustain = 0.5
            default_peak = 1.2
            threshold_max = 30.0
            gap_threshold_pct = 15.0
        "#;

        let config: AnalysisConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_sustain, 0.5);
        assert_eq!(config.default_peak, 1.2);
        assert_eq!(config.threshold_max, 30.0);
        assert_eq!(config.gap_threshold_pct, 15.0);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml = r#"
            threshold_max = 30.0
        "#;

        let config: AnalysisConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_sustain, 0.6);
        assert_eq!(config.default_peak, 1.0);
        assert_eq!(config.threshold_max, 30.0);
    }

    #[test]
    fn test_from_file_missing() {
        let result = AnalysisConfig::from_file("/nonexistent/analysis.toml");
        assert!(matches!(result, Err(AnalysisError::Config(_))));
    }
}
