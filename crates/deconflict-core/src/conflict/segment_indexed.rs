//! Bounding-box queries over primary segments with exact segment distance.

use super::{scan_others, ConflictDetector, Execution, Strategy};
use crate::dedup::deduplicate;
use crate::error::ConfigurationError;
use crate::geometry::{segment_distance, Aabb};
use crate::models::{seconds_between, Conflict, Segment, Trajectory};
use crate::rules::DetectionConfig;
use crate::spatial::{BoxIndex, RTreeBoxIndex};

/// Indexes the bounding boxes of primary segments and, for every segment of
/// each other trajectory:
///
/// 1. queries primary segments whose boxes intersect the segment's box,
/// 2. compares the midpoints of the two segments' time windows,
/// 3. computes the exact segment-to-segment distance for survivors.
///
/// Records are located at the midpoint of the other segment and stamped with
/// the middle of its time window. The concatenated output is deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentIndexedDetector {
    pub execution: Execution,
    /// Grow each query box by `spatial_threshold` on every side. Off by
    /// default: only directly overlapping boxes become candidates, so segments
    /// that pass within the threshold without their boxes touching are missed.
    pub expand_query: bool,
}

impl SegmentIndexedDetector {
    pub fn new(execution: Execution) -> Self {
        Self {
            execution,
            expand_query: false,
        }
    }

    pub fn with_expanded_query(mut self, expand_query: bool) -> Self {
        self.expand_query = expand_query;
        self
    }
}

impl ConflictDetector for SegmentIndexedDetector {
    fn strategy(&self) -> Strategy {
        Strategy::SegmentIndexed
    }

    fn detect(
        &self,
        primary: &Trajectory,
        others: &[Trajectory],
        config: &DetectionConfig,
    ) -> Result<Vec<Conflict>, ConfigurationError> {
        config.validate()?;

        let primary_segments = primary.segments();
        let index = RTreeBoxIndex::build(
            primary_segments
                .iter()
                .enumerate()
                .map(|(idx, seg)| (seg.bounds(), idx)),
        );
        tracing::debug!(segments = index.len(), "built primary segment index");

        let margin = if self.expand_query {
            config.spatial_threshold
        } else {
            0.0
        };

        let conflicts = scan_others(others, self.execution, |other| {
            scan_trajectory(&primary_segments, &index, other, config, margin)
        });

        Ok(deduplicate(conflicts))
    }
}

fn scan_trajectory(
    primary_segments: &[Segment],
    index: &impl BoxIndex,
    other: &Trajectory,
    config: &DetectionConfig,
    margin: f64,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    let mut candidates_seen = 0usize;

    for other_seg in other.segments() {
        let query = inflate(other_seg.bounds(), margin);
        let candidates = index.query_intersecting(&query);
        candidates_seen += candidates.len();

        let mid_other = other_seg.mid_time();

        for idx in candidates {
            let primary_seg = &primary_segments[idx];
            let time_diff = seconds_between(mid_other, primary_seg.mid_time());
            if time_diff > config.temporal_threshold {
                continue;
            }

            let dist = segment_distance(
                other_seg.start.position,
                other_seg.end.position,
                primary_seg.start.position,
                primary_seg.end.position,
            );
            if dist <= config.spatial_threshold {
                conflicts.push(Conflict::new(
                    other_seg.midpoint(),
                    mid_other,
                    dist,
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
        "segment-indexed scan"
    );
    conflicts
}

fn inflate(bbox: Aabb, margin: f64) -> Aabb {
    if margin == 0.0 {
        return bbox;
    }
    Aabb {
        min: bbox.min.map(|v| v - margin),
        max: bbox.max.map(|v| v + margin),
    }
}
