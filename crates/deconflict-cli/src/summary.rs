//! Human-readable mission summary and JSON export.

use deconflict_core::{Conflict, ConflictReport, Strategy};

fn heading(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::BruteForce => "Mission Status",
        Strategy::PointIndexed => "Point-Index Conflict Check",
        Strategy::SegmentIndexed => "Segment-Index Conflict Check",
    }
}

/// Render the status line followed by one block per conflict.
pub fn render_summary(report: &ConflictReport) -> String {
    let (status, details) = report.status();
    let mut out = format!(
        "{}: {}\n",
        heading(report.strategy),
        status.as_str().to_uppercase()
    );

    if details.is_empty() {
        out.push_str("No conflicts detected.\n");
        return out;
    }

    for (i, conflict) in details.iter().enumerate() {
        let [x, y, z] = conflict.location;
        out.push_str(&format!(
            "\nConflict #{}\n  Time      : {}\n  Location  : ({x}, {y}, {z})\n  Drone     : {}\n  Distance  : {} meters\n  Time Diff : {} seconds\n",
            i + 1,
            conflict.timestamp.to_rfc3339(),
            conflict.conflicting_drone,
            conflict.distance,
            conflict.time_diff,
        ));
    }
    out
}

/// Conflicts as a pretty-printed JSON array of conflict records.
pub fn conflicts_json(conflicts: &[Conflict]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(conflicts)
}
