//! Euclidean geometry for conflict detection.
//!
//! Positions are plain `[x, y, z]` arrays in meters, which is also the point
//! type used by the R-tree indexes in [`crate::spatial`].

use serde::{Deserialize, Serialize};

pub type Point3 = [f64; 3];

#[inline]
pub fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn add(a: Point3, b: Point3) -> Point3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn scale(s: f64, v: Point3) -> Point3 {
    [s * v[0], s * v[1], s * v[2]]
}

#[inline]
pub fn dot(a: Point3, b: Point3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn norm(v: Point3) -> f64 {
    dot(v, v).sqrt()
}

pub fn distance(a: Point3, b: Point3) -> f64 {
    norm(sub(a, b))
}

pub fn midpoint(a: Point3, b: Point3) -> Point3 {
    [
        (a[0] + b[0]) / 2.0,
        (a[1] + b[1]) / 2.0,
        (a[2] + b[2]) / 2.0,
    ]
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Componentwise min/max of two corners given in any order.
    pub fn from_corners(a: Point3, b: Point3) -> Self {
        Self {
            min: [a[0].min(b[0]), a[1].min(b[1]), a[2].min(b[2])],
            max: [a[0].max(b[0]), a[1].max(b[1]), a[2].max(b[2])],
        }
    }

    /// Closed-interval overlap on every axis (touching boxes intersect).
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }
}

/// Closest points found by [`segment_closest_points`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoints {
    pub on_first: Point3,
    pub on_second: Point3,
    pub distance: f64,
}

/// Minimum distance between segments `(a, b)` and `(c, d)`.
pub fn segment_distance(a: Point3, b: Point3, c: Point3, d: Point3) -> f64 {
    segment_closest_points(a, b, c, d).distance
}

/// Clamped closest-point parametrization of two segments.
///
/// Solves for the parameters of the closest points on the two infinite lines
/// and clamps each independently to `[0, 1]`. There is no re-projection after
/// clamping, so when the unconstrained optimum falls outside both segments the
/// result can overestimate the true segment-to-segment distance. Parallel and
/// zero-length segments (`denom == 0`) fall back to `s = t = 0`.
pub fn segment_closest_points(a: Point3, b: Point3, c: Point3, d: Point3) -> ClosestPoints {
    let u = sub(b, a);
    let v = sub(d, c);
    let w0 = sub(a, c);

    let uu = dot(u, u);
    let uv = dot(u, v);
    let vv = dot(v, v);
    let uw = dot(u, w0);
    let vw = dot(v, w0);

    let denom = uu * vv - uv * uv;
    let (s, t) = if denom != 0.0 {
        ((uv * vw - vv * uw) / denom, (uu * vw - uv * uw) / denom)
    } else {
        (0.0, 0.0)
    };

    let s = s.clamp(0.0, 1.0);
    let t = t.clamp(0.0, 1.0);

    let on_first = add(a, scale(s, u));
    let on_second = add(c, scale(t, v));

    ClosestPoints {
        on_first,
        on_second,
        distance: distance(on_first, on_second),
    }
}
