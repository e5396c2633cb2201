//! Conflict detection between a primary trajectory and a set of others.
//!
//! Three interchangeable strategies share the [`ConflictDetector`] contract:
//!
//! - [`BruteForceDetector`]: exhaustive waypoint pairs, the correctness oracle
//! - [`PointIndexedDetector`]: radius queries over primary waypoints
//! - [`SegmentIndexedDetector`]: bounding-box queries over primary segments,
//!   exact segment distance, deduplicated output
//!
//! Every other trajectory is scanned independently against an index built once
//! from the primary, so detectors can fan the scan out over a rayon pool. The
//! per-trajectory results are always concatenated in submission order.

mod brute_force;
mod point_indexed;
mod segment_indexed;

pub use brute_force::BruteForceDetector;
pub use point_indexed::PointIndexedDetector;
pub use segment_indexed::SegmentIndexedDetector;

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::models::{Conflict, Trajectory};
use crate::rules::DetectionConfig;

/// Common interface of all detection strategies.
pub trait ConflictDetector: Send + Sync {
    fn strategy(&self) -> Strategy;

    /// Detect conflicts between `primary` and each trajectory in `others`.
    ///
    /// Fails with [`ConfigurationError`] before doing any work if a threshold
    /// is not strictly positive.
    fn detect(
        &self,
        primary: &Trajectory,
        others: &[Trajectory],
        config: &DetectionConfig,
    ) -> Result<Vec<Conflict>, ConfigurationError>;
}

/// Available detection strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    BruteForce,
    PointIndexed,
    SegmentIndexed,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::BruteForce,
        Strategy::PointIndexed,
        Strategy::SegmentIndexed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::BruteForce => "brute-force",
            Strategy::PointIndexed => "point-indexed",
            Strategy::SegmentIndexed => "segment-indexed",
        }
    }

    /// Boxed detector for this strategy with default settings.
    pub fn detector(self, execution: Execution) -> Box<dyn ConflictDetector> {
        match self {
            Strategy::BruteForce => Box::new(BruteForceDetector::new(execution)),
            Strategy::PointIndexed => Box::new(PointIndexedDetector::new(execution)),
            Strategy::SegmentIndexed => Box::new(SegmentIndexedDetector::new(execution)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| format!("unknown strategy: {s}"))
    }
}

/// How the scan over other trajectories is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    #[default]
    Sequential,
    /// One rayon task per other trajectory
    Parallel,
}

/// Overall mission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionStatus {
    #[serde(rename = "clear")]
    Clear,
    #[serde(rename = "conflict detected")]
    ConflictDetected,
}

impl DetectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionStatus::Clear => "clear",
            DetectionStatus::ConflictDetected => "conflict detected",
        }
    }
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    pub strategy: Strategy,
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    /// `(Clear, [])` when no conflicts were found, else `(ConflictDetected, conflicts)`.
    pub fn status(&self) -> (DetectionStatus, &[Conflict]) {
        status_of(&self.conflicts)
    }
}

pub fn status_of(conflicts: &[Conflict]) -> (DetectionStatus, &[Conflict]) {
    if conflicts.is_empty() {
        (DetectionStatus::Clear, &[])
    } else {
        (DetectionStatus::ConflictDetected, conflicts)
    }
}

/// Run `detector` and wrap the result in a [`ConflictReport`].
pub fn run_detection(
    detector: &dyn ConflictDetector,
    primary: &Trajectory,
    others: &[Trajectory],
    config: &DetectionConfig,
) -> Result<ConflictReport, ConfigurationError> {
    let conflicts = detector.detect(primary, others, config)?;
    tracing::info!(
        strategy = %detector.strategy(),
        primary = %primary.id,
        others = others.len(),
        conflicts = conflicts.len(),
        "conflict detection finished"
    );
    Ok(ConflictReport {
        strategy: detector.strategy(),
        conflicts,
    })
}

/// Apply `scan` to every other trajectory and concatenate in submission order.
fn scan_others<F>(others: &[Trajectory], execution: Execution, scan: F) -> Vec<Conflict>
where
    F: Fn(&Trajectory) -> Vec<Conflict> + Send + Sync,
{
    match execution {
        Execution::Sequential => others.iter().flat_map(&scan).collect(),
        Execution::Parallel => {
            let per_trajectory: Vec<Vec<Conflict>> = others.par_iter().map(&scan).collect();
            per_trajectory.into_iter().flatten().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap() + TimeDelta::seconds(secs)
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>(), Ok(strategy));
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.as_str()));
        }
        assert!("kd-tree".parse::<Strategy>().is_err());
    }

    #[test]
    fn status_reflects_conflicts() {
        let clear = ConflictReport {
            strategy: Strategy::BruteForce,
            conflicts: vec![],
        };
        let (status, details) = clear.status();
        assert_eq!(status, DetectionStatus::Clear);
        assert!(details.is_empty());
        assert_eq!(status.to_string(), "clear");

        let conflict = Conflict::new([0.0, 0.0, 0.0], t(0), 1.0, 0.0, "other");
        let (status, details) = status_of(std::slice::from_ref(&conflict));
        assert_eq!(status, DetectionStatus::ConflictDetected);
        assert_eq!(details.len(), 1);
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"conflict detected\""
        );
    }

    #[test]
    fn every_strategy_rejects_bad_thresholds_and_handles_no_others() {
        let primary = Trajectory::new(
            "primary",
            vec![
                Waypoint::new(0.0, 0.0, 0.0, t(0)),
                Waypoint::new(10.0, 0.0, 0.0, t(10)),
            ],
        );
        for strategy in Strategy::ALL {
            let detector = strategy.detector(Execution::Sequential);
            assert_eq!(detector.strategy(), strategy);
            assert!(detector
                .detect(&primary, &[], &DetectionConfig::new(0.0, 1.0))
                .is_err());
            assert!(detector
                .detect(&primary, &[], &DetectionConfig::new(1.0, -1.0))
                .is_err());
            let report =
                run_detection(detector.as_ref(), &primary, &[], &DetectionConfig::default())
                    .unwrap();
            assert_eq!(report.status().0, DetectionStatus::Clear);
        }
    }

    #[test]
    fn scan_preserves_submission_order_in_parallel() {
        let others: Vec<Trajectory> = (0..16)
            .map(|i| Trajectory::new(format!("d{i}"), vec![]))
            .collect();
        let scan = |other: &Trajectory| {
            vec![Conflict::new([0.0; 3], t(0), 0.0, 0.0, other.id.clone())]
        };
        let sequential = scan_others(&others, Execution::Sequential, scan);
        let parallel = scan_others(&others, Execution::Parallel, scan);
        assert_eq!(sequential, parallel);
        assert_eq!(parallel[15].conflicting_drone, "d15");
    }
}
