//! Radius queries over primary waypoint positions.

use super::{scan_others, ConflictDetector, Execution, Strategy};
use crate::error::ConfigurationError;
use crate::geometry::midpoint;
use crate::models::{seconds_between, Conflict, Trajectory};
use crate::rules::DetectionConfig;
use crate::spatial::{PointIndex, RTreePointIndex};

/// Indexes primary waypoint positions (space only), queries a sphere of
/// `spatial_threshold` around each other waypoint, then filters the
/// candidates by time.
///
/// The reported `distance` is the distance from the other waypoint to its
/// nearest primary waypoint, computed once per other waypoint. It is not the
/// distance to the candidate that passed the time filter, which may be
/// farther away. No deduplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointIndexedDetector {
    pub execution: Execution,
}

impl PointIndexedDetector {
    pub fn new(execution: Execution) -> Self {
        Self { execution }
    }
}

impl ConflictDetector for PointIndexedDetector {
    fn strategy(&self) -> Strategy {
        Strategy::PointIndexed
    }

    fn detect(
        &self,
        primary: &Trajectory,
        others: &[Trajectory],
        config: &DetectionConfig,
    ) -> Result<Vec<Conflict>, ConfigurationError> {
        config.validate()?;

        let index = RTreePointIndex::build(
            primary
                .waypoints
                .iter()
                .enumerate()
                .map(|(idx, wp)| (wp.position, idx)),
        );
        tracing::debug!(points = index.len(), "built primary point index");

        Ok(scan_others(others, self.execution, |other| {
            scan_trajectory(primary, &index, other, config)
        }))
    }
}

fn scan_trajectory(
    primary: &Trajectory,
    index: &impl PointIndex,
    other: &Trajectory,
    config: &DetectionConfig,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut candidates_seen = 0usize;

    for q in &other.waypoints {
        let candidates = index.query_radius(q.position, config.spatial_threshold);
        if candidates.is_empty() {
            continue;
        }
        candidates_seen += candidates.len();

        let Some(nearest) = index.nearest_distance(q.position) else {
            continue;
        };

        for idx in candidates {
            let p = &primary.waypoints[idx];
            let time_diff = seconds_between(q.timestamp, p.timestamp);
            if time_diff <= config.temporal_threshold {
                conflicts.push(Conflict::new(
                    midpoint(q.position, p.position),
                    q.timestamp,
                    nearest,
                    time_diff,
                    other.id.as_str(),
                ));
            }
        }
    }

    tracing::debug!(
        other = %other.id,
        candidates = candidates_seen,
        conflicts = conflicts.len(),
        "point-indexed scan"
    );
    conflicts
}
