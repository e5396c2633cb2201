//! Exhaustive waypoint-pair comparison.

use super::{scan_others, ConflictDetector, Execution, Strategy};
use crate::error::ConfigurationError;
use crate::geometry::{distance, midpoint};
use crate::models::{seconds_between, Conflict, Trajectory};
use crate::rules::DetectionConfig;

/// Compares every primary waypoint with every waypoint of each other
/// trajectory. O(N·M) per pair, no index, no deduplication: densely sampled
/// trajectories yield one record per qualifying pair. Used as the oracle for
/// the indexed strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceDetector {
    pub execution: Execution,
}

impl BruteForceDetector {
    pub fn new(execution: Execution) -> Self {
        Self { execution }
    }
}

impl ConflictDetector for BruteForceDetector {
    fn strategy(&self) -> Strategy {
        Strategy::BruteForce
    }

    fn detect(
        &self,
        primary: &Trajectory,
        others: &[Trajectory],
        config: &DetectionConfig,
    ) -> Result<Vec<Conflict>, ConfigurationError> {
        config.validate()?;

        Ok(scan_others(others, self.execution, |other| {
            scan_pair(primary, other, config)
        }))
    }
}

fn scan_pair(primary: &Trajectory, other: &Trajectory, config: &DetectionConfig) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for p in &primary.waypoints {
        for q in &other.waypoints {
            let time_diff = seconds_between(p.timestamp, q.timestamp);
            if time_diff > config.temporal_threshold {
                continue;
            }
            let dist = distance(p.position, q.position);
            if dist <= config.spatial_threshold {
                conflicts.push(Conflict::new(
                    midpoint(p.position, q.position),
                    p.timestamp,
                    dist,
                    time_diff,
                    other.id.as_str(),
                ));
            }
        }
    }

    tracing::debug!(other = %other.id, conflicts = conflicts.len(), "brute-force scan");
    conflicts
}
