//! Spatial indexes over the primary trajectory.
//!
//! Two capabilities are needed by the indexed detectors: radius queries over
//! waypoint positions and intersection queries over segment bounding boxes.
//! Both are backed by `rstar` R-trees bulk-loaded once per detection run.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::geometry::{Aabb, Point3};

/// Radius queries over indexed points.
pub trait PointIndex {
    /// Payload ids of every stored point within `radius` of `center` (inclusive),
    /// sorted ascending.
    fn query_radius(&self, center: Point3, radius: f64) -> Vec<usize>;

    /// Distance from `center` to the nearest stored point, `None` when empty.
    fn nearest_distance(&self, center: Point3) -> Option<f64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Intersection queries over indexed bounding boxes.
///
/// Results may include false positives with respect to the underlying
/// geometry, callers re-check candidates exactly.
pub trait BoxIndex {
    /// Payload ids of every stored box overlapping `bbox` (touching included),
    /// sorted ascending.
    fn query_intersecting(&self, bbox: &Aabb) -> Vec<usize>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    id: usize,
    position: Point3,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<Point3>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &Point3) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// R-tree point index.
pub struct RTreePointIndex {
    tree: RTree<IndexedPoint>,
}

impl RTreePointIndex {
    pub fn build(points: impl IntoIterator<Item = (Point3, usize)>) -> Self {
        let indexed: Vec<IndexedPoint> = points
            .into_iter()
            .map(|(position, id)| IndexedPoint { id, position })
            .collect();
        Self {
            tree: RTree::bulk_load(indexed),
        }
    }
}

impl PointIndex for RTreePointIndex {
    fn query_radius(&self, center: Point3, radius: f64) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .tree
            .locate_within_distance(center, radius * radius)
            .map(|p| p.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn nearest_distance(&self, center: Point3) -> Option<f64> {
        self.tree
            .nearest_neighbor(&center)
            .map(|p| p.distance_2(&center).sqrt())
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

#[derive(Debug, Clone, Copy)]
struct IndexedBox {
    id: usize,
    bounds: AABB<Point3>,
}

impl RTreeObject for IndexedBox {
    type Envelope = AABB<Point3>;

    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

fn to_envelope(bbox: &Aabb) -> AABB<Point3> {
    AABB::from_corners(bbox.min, bbox.max)
}

/// R-tree bounding-box index.
pub struct RTreeBoxIndex {
    tree: RTree<IndexedBox>,
}

impl RTreeBoxIndex {
    pub fn build(boxes: impl IntoIterator<Item = (Aabb, usize)>) -> Self {
        let indexed: Vec<IndexedBox> = boxes
            .into_iter()
            .map(|(bbox, id)| IndexedBox {
                id,
                bounds: to_envelope(&bbox),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(indexed),
        }
    }
}

impl BoxIndex for RTreeBoxIndex {
    fn query_intersecting(&self, bbox: &Aabb) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&to_envelope(bbox))
            .map(|b| b.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::distance;
    use approx::assert_relative_eq;

    fn grid_points() -> Vec<(Point3, usize)> {
        let mut points = Vec::new();
        for i in 0..10 {
            for j in 0..10 {
                points.push(([i as f64, j as f64, (i + j) as f64 * 0.5], i * 10 + j));
            }
        }
        points
    }

    #[test]
    fn radius_query_matches_linear_scan() {
        let points = grid_points();
        let index = RTreePointIndex::build(points.clone());
        let center = [4.3, 5.1, 4.0];

        for radius in [0.5, 1.0, 2.5, 4.0] {
            let mut expected: Vec<usize> = points
                .iter()
                .filter(|(p, _)| distance(*p, center) <= radius)
                .map(|(_, id)| *id)
                .collect();
            expected.sort_unstable();
            assert_eq!(index.query_radius(center, radius), expected, "radius {radius}");
        }
    }

    #[test]
    fn radius_query_includes_boundary() {
        let index = RTreePointIndex::build([([3.0, 4.0, 0.0], 7)]);
        assert_eq!(index.query_radius([0.0, 0.0, 0.0], 5.0), vec![7]);
    }

    #[test]
    fn nearest_distance() {
        let index = RTreePointIndex::build([([0.0, 0.0, 0.0], 0), ([10.0, 0.0, 0.0], 1)]);
        assert_relative_eq!(index.nearest_distance([7.0, 4.0, 0.0]).unwrap(), 5.0);
        let empty = RTreePointIndex::build(std::iter::empty());
        assert!(empty.is_empty());
        assert!(empty.nearest_distance([0.0, 0.0, 0.0]).is_none());
        assert!(empty.query_radius([0.0, 0.0, 0.0], 100.0).is_empty());
    }

    #[test]
    fn box_query_finds_every_overlapping_box() {
        let boxes: Vec<(Aabb, usize)> = (0..20)
            .map(|i| {
                let x = i as f64 * 2.0;
                (Aabb::from_corners([x, 0.0, 0.0], [x + 3.0, 1.0, 1.0]), i)
            })
            .collect();
        let index = RTreeBoxIndex::build(boxes.clone());
        let query = Aabb::from_corners([9.0, 0.5, 0.5], [12.0, 0.5, 0.5]);

        let mut expected: Vec<usize> = boxes
            .iter()
            .filter(|(b, _)| b.intersects(&query))
            .map(|(_, id)| *id)
            .collect();
        expected.sort_unstable();
        assert_eq!(index.query_intersecting(&query), expected);
        assert_eq!(expected, vec![3, 4, 5, 6]);
    }

    #[test]
    fn flat_boxes_intersect_when_touching() {
        let index = RTreeBoxIndex::build([(Aabb::from_corners([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]), 0)]);
        let query = Aabb::from_corners([5.0, 1.0, 0.0], [5.0, -1.0, 0.0]);
        assert_eq!(index.query_intersecting(&query), vec![0]);
        assert_eq!(index.len(), 1);
    }
}
