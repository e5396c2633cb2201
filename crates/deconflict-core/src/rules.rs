//! Detection thresholds.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Thresholds for one detection run. Never mutated during detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Maximum separation in meters for two positions/segments to conflict
    pub spatial_threshold: f64,
    /// Maximum time separation in seconds for two positions/segments to conflict
    pub temporal_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            spatial_threshold: 5.0,
            temporal_threshold: 60.0,
        }
    }
}

impl DetectionConfig {
    pub fn new(spatial_threshold: f64, temporal_threshold: f64) -> Self {
        Self {
            spatial_threshold,
            temporal_threshold,
        }
    }

    /// Build a config and validate it in one step.
    pub fn try_new(
        spatial_threshold: f64,
        temporal_threshold: f64,
    ) -> Result<Self, ConfigurationError> {
        let config = Self::new(spatial_threshold, temporal_threshold);
        config.validate()?;
        Ok(config)
    }

    /// Both thresholds must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_threshold("spatial_threshold", self.spatial_threshold)?;
        check_threshold("temporal_threshold", self.temporal_threshold)
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ConfigurationError::NonFiniteThreshold { name });
    }
    if value <= 0.0 {
        return Err(ConfigurationError::NonPositiveThreshold { name, value });
    }
    Ok(())
}
