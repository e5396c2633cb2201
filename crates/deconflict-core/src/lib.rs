//! Strategic deconfliction for UAV missions.
//!
//! Detects spatio-temporal conflicts between one primary trajectory and a set
//! of other trajectories using one of three interchangeable strategies.

pub mod conflict;
pub mod dedup;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod models;
pub mod rules;
pub mod spatial;

pub use conflict::{
    run_detection, status_of, BruteForceDetector, ConflictDetector, ConflictReport,
    DetectionStatus, Execution, PointIndexedDetector, SegmentIndexedDetector, Strategy,
};
pub use dedup::deduplicate;
pub use error::{ConfigurationError, LoadError};
pub use geometry::{segment_distance, Aabb, Point3};
pub use loader::{discover_simulated, load_trajectories, load_trajectory, load_trajectory_from_reader};
pub use models::{Conflict, Segment, Trajectory, Waypoint};
pub use rules::DetectionConfig;
pub use spatial::{BoxIndex, PointIndex, RTreeBoxIndex, RTreePointIndex};
