//! Core data models for the deconfliction system.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Point3};

/// One timestamped 3D position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Point3,
    pub timestamp: DateTime<Utc>,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, z: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            position: [x, y, z],
            timestamp,
        }
    }
}

/// Time-ordered sequence of waypoints flown by one drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trajectory {
    /// Drone identifier (the source file name when loaded from disk)
    pub id: String,
    pub waypoints: Vec<Waypoint>,
}

impl Trajectory {
    pub fn new(id: impl Into<String>, waypoints: Vec<Waypoint>) -> Self {
        Self {
            id: id.into(),
            waypoints,
        }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Consecutive waypoint pairs. Empty for trajectories with fewer than two points.
    pub fn segments(&self) -> Vec<Segment> {
        self.waypoints
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .collect()
    }
}

/// The line between two consecutive waypoints of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Waypoint,
    pub end: Waypoint,
}

impl Segment {
    pub fn new(start: Waypoint, end: Waypoint) -> Self {
        Self { start, end }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_corners(self.start.position, self.end.position)
    }

    /// `[min(t0, t1), max(t0, t1)]`
    pub fn time_window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let a = self.start.timestamp;
        let b = self.end.timestamp;
        (a.min(b), a.max(b))
    }

    /// Representative instant of the segment: the middle of its time window.
    pub fn mid_time(&self) -> DateTime<Utc> {
        let (start, end) = self.time_window();
        start + (end - start) / 2
    }

    pub fn midpoint(&self) -> Point3 {
        crate::geometry::midpoint(self.start.position, self.end.position)
    }
}

/// A spatio-temporal proximity event between the primary and one other trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Rounded to 2 decimals
    pub location: Point3,
    pub timestamp: DateTime<Utc>,
    /// Meters, rounded to 2 decimals
    pub distance: f64,
    /// Seconds, rounded to 2 decimals
    pub time_diff: f64,
    pub conflicting_drone: String,
}

impl Conflict {
    /// Build a conflict record, rounding location, distance and time difference.
    pub fn new(
        location: Point3,
        timestamp: DateTime<Utc>,
        distance: f64,
        time_diff: f64,
        conflicting_drone: impl Into<String>,
    ) -> Self {
        Self {
            location: location.map(round2),
            timestamp,
            distance: round2(distance),
            time_diff: round2(time_diff),
            conflicting_drone: conflicting_drone.into(),
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Absolute separation between two instants in (fractional) seconds.
pub fn seconds_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    delta_seconds(a - b).abs()
}

fn delta_seconds(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}
