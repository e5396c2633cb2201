//! Loading trajectories from CSV files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use deconflict_core::{
    discover_simulated, load_trajectories, load_trajectory, DetectionConfig, LoadError,
    ConflictDetector, SegmentIndexedDetector,
};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("deconflict-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_line(dir: &Path, file: &str, y: f64, start_minute: u32) {
    let mut csv = String::from("x,y,z,timestamp\n");
    for i in 0..6 {
        csv.push_str(&format!(
            "{},{},30.0,2025-01-01 10:{:02}:{:02}\n",
            i * 10,
            y,
            start_minute,
            i * 10
        ));
    }
    fs::write(dir.join(file), csv).unwrap();
}

#[test]
fn discovers_and_loads_simulated_drones() {
    let dir = scratch_dir("discover");
    write_line(&dir, "primary_drone.csv", 0.0, 0);
    write_line(&dir, "simulated_drone_2.csv", 100.0, 0);
    write_line(&dir, "simulated_drone_1.csv", 0.0, 0);
    fs::write(dir.join("notes.txt"), "ignore me").unwrap();

    let sims = discover_simulated(&dir).unwrap();
    let names: Vec<String> = sims
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["simulated_drone_1.csv", "simulated_drone_2.csv"]);

    let primary = load_trajectory(dir.join("primary_drone.csv")).unwrap();
    let others = load_trajectories(&sims).unwrap();
    assert_eq!(primary.id, "primary_drone.csv");
    assert_eq!(primary.len(), 6);
    assert_eq!(others.len(), 2);

    let conflicts = SegmentIndexedDetector::default()
        .detect(&primary, &others, &DetectionConfig::new(5.0, 60.0))
        .unwrap();
    assert!(!conflicts.is_empty());
    assert!(conflicts
        .iter()
        .all(|c| c.conflicting_drone == "simulated_drone_1.csv"));

    let json = serde_json::to_value(&conflicts).unwrap();
    let first = &json[0];
    assert!(first["location"].is_array());
    assert!(first["timestamp"].as_str().unwrap().starts_with("2025-01-01T10:00:"));
    assert_eq!(first["conflicting_drone"], "simulated_drone_1.csv");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = scratch_dir("missing");
    let err = load_trajectory(dir.join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(discover_simulated(dir.join("absent")).is_err());
    fs::remove_dir_all(&dir).unwrap();
}
