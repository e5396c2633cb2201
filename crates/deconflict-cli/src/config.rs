//! CLI configuration from environment.

use std::env;
use std::path::PathBuf;

use deconflict_core::DetectionConfig;

const PRIMARY_FILE: &str = "primary_drone.csv";

#[derive(Debug, Clone)]
pub struct Config {
    pub detection: DetectionConfig,
    pub waypoint_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection: DetectionConfig::default(),
            waypoint_dir: PathBuf::from("waypoints"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            detection: DetectionConfig {
                spatial_threshold: lookup("DECONFLICT_SPATIAL_THRESHOLD")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.detection.spatial_threshold),
                temporal_threshold: lookup("DECONFLICT_TEMPORAL_THRESHOLD")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.detection.temporal_threshold),
            },
            waypoint_dir: lookup("DECONFLICT_WAYPOINT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.waypoint_dir),
        }
    }

    /// Apply command-line values on top of this configuration.
    pub fn with_overrides(
        mut self,
        spatial: Option<f64>,
        temporal: Option<f64>,
        dir: Option<PathBuf>,
    ) -> Self {
        if let Some(spatial) = spatial {
            self.detection.spatial_threshold = spatial;
        }
        if let Some(temporal) = temporal {
            self.detection.temporal_threshold = temporal;
        }
        if let Some(dir) = dir {
            self.waypoint_dir = dir;
        }
        self
    }

    /// `explicit` if given, else `<waypoint_dir>/primary_drone.csv`.
    pub fn primary_path(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit.unwrap_or_else(|| self.waypoint_dir.join(PRIMARY_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn reads_overrides_and_ignores_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DECONFLICT_SPATIAL_THRESHOLD", "12.5"),
            ("DECONFLICT_TEMPORAL_THRESHOLD", "soon"),
            ("DECONFLICT_WAYPOINT_DIR", "/data/missions"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.detection.spatial_threshold, 12.5);
        assert_eq!(config.detection.temporal_threshold, 60.0);
        assert_eq!(config.waypoint_dir, PathBuf::from("/data/missions"));
    }

    #[test]
    fn flags_override_environment() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DECONFLICT_SPATIAL_THRESHOLD", "12.5"),
            ("DECONFLICT_TEMPORAL_THRESHOLD", "30"),
            ("DECONFLICT_WAYPOINT_DIR", "/data/missions"),
        ]);
        let from_env = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        let config = from_env
            .clone()
            .with_overrides(Some(2.0), None, Some(PathBuf::from("runs/today")));
        assert_eq!(config.detection.spatial_threshold, 2.0);
        assert_eq!(config.detection.temporal_threshold, 30.0);
        assert_eq!(config.waypoint_dir, PathBuf::from("runs/today"));

        let untouched = from_env.with_overrides(None, None, None);
        assert_eq!(untouched.detection, DetectionConfig::new(12.5, 30.0));
        assert_eq!(untouched.waypoint_dir, PathBuf::from("/data/missions"));
    }

    #[test]
    fn primary_path_defaults_into_waypoint_dir() {
        let config = Config::default().with_overrides(None, None, Some(PathBuf::from("wp")));
        assert_eq!(config.primary_path(None), PathBuf::from("wp/primary_drone.csv"));
        assert_eq!(
            config.primary_path(Some(PathBuf::from("other/lead.csv"))),
            PathBuf::from("other/lead.csv")
        );
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.detection, DetectionConfig::default());
        assert_eq!(config.waypoint_dir, PathBuf::from("waypoints"));
    }
}
