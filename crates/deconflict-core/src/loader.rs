//! CSV waypoint loading.
//!
//! Files carry a header row `x,y,z,timestamp`; the `z` column may be missing
//! or empty (defaults to 0.0). The trajectory id is the file name.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::LoadError;
use crate::models::{Trajectory, Waypoint};

const SIMULATED_PREFIX: &str = "simulated_drone_";

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMAT_SPACED: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

#[derive(Debug, Deserialize)]
struct WaypointRecord {
    x: f64,
    y: f64,
    #[serde(default)]
    z: Option<f64>,
    timestamp: String,
}

/// Parse an ISO-8601 timestamp. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(value, OFFSET_FORMAT_SPACED) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

/// Load a trajectory from a CSV file, using the file name as its id.
pub fn load_trajectory(path: impl AsRef<Path>) -> Result<Trajectory, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_trajectory_from_reader(trajectory_id(path), file)
}

/// Load a trajectory from any CSV source.
pub fn load_trajectory_from_reader<R: Read>(
    id: impl Into<String>,
    reader: R,
) -> Result<Trajectory, LoadError> {
    let id = id.into();
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut waypoints: Vec<Waypoint> = Vec::new();
    for (idx, record) in csv_reader.deserialize::<WaypointRecord>().enumerate() {
        let row = idx + 1;
        let record = record.map_err(|source| LoadError::Csv {
            trajectory: id.clone(),
            source,
        })?;

        let timestamp =
            parse_timestamp(&record.timestamp).ok_or_else(|| LoadError::Timestamp {
                trajectory: id.clone(),
                row,
                value: record.timestamp.clone(),
            })?;

        if let Some(prev) = waypoints.last() {
            if timestamp <= prev.timestamp {
                return Err(LoadError::NonIncreasingTimestamp {
                    trajectory: id,
                    row,
                });
            }
        }

        waypoints.push(Waypoint::new(
            record.x,
            record.y,
            record.z.unwrap_or(0.0),
            timestamp,
        ));
    }

    tracing::debug!(trajectory = %id, waypoints = waypoints.len(), "loaded trajectory");
    Ok(Trajectory::new(id, waypoints))
}

/// Load several trajectories, preserving the order of `paths`.
pub fn load_trajectories<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Trajectory>, LoadError> {
    paths.iter().map(load_trajectory).collect()
}

/// `simulated_drone_*.csv` files in `dir`, sorted by name.
pub fn discover_simulated(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LoadError> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(SIMULATED_PREFIX) && name.ends_with(".csv"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn trajectory_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
