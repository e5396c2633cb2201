//! Run strategic deconfliction over waypoint CSV files.
//!
//! Loads the primary drone's trajectory and every simulated drone's
//! trajectory, runs the selected detection strategy, prints the mission
//! summary and optionally writes the conflicts as a JSON array.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use deconflict_cli::{conflicts_json, render_summary, Config, StrategyArg};
use deconflict_core::{
    discover_simulated, load_trajectories, load_trajectory, run_detection, ConflictDetector,
    Execution, SegmentIndexedDetector, Strategy,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// UAV strategic deconfliction
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Folder holding primary_drone.csv and simulated_drone_*.csv
    /// (default: $DECONFLICT_WAYPOINT_DIR or ./waypoints)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Primary trajectory CSV (default: <dir>/primary_drone.csv)
    #[arg(long)]
    primary: Option<PathBuf>,

    /// Other trajectory CSVs (default: every <dir>/simulated_drone_*.csv)
    #[arg(long, num_args = 1..)]
    others: Vec<PathBuf>,

    /// Detection strategy
    #[arg(long, value_enum, default_value = "segment-indexed")]
    strategy: StrategyArg,

    /// Spatial threshold in meters (default: $DECONFLICT_SPATIAL_THRESHOLD or 5)
    #[arg(long)]
    spatial: Option<f64>,

    /// Temporal threshold in seconds (default: $DECONFLICT_TEMPORAL_THRESHOLD or 60)
    #[arg(long)]
    temporal: Option<f64>,

    /// Scan other trajectories on a thread pool
    #[arg(long)]
    parallel: bool,

    /// Grow segment queries by the spatial threshold (segment-indexed only)
    #[arg(long)]
    expand_query: bool,

    /// Write conflicts as a JSON array to this file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print conflicts as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("deconflict=info".parse()?))
        .init();

    let args = Args::parse();
    let config = Config::from_env().with_overrides(args.spatial, args.temporal, args.dir.clone());
    let detection = config.detection;
    detection.validate().context("invalid detection thresholds")?;

    let dir = &config.waypoint_dir;
    let primary_path = config.primary_path(args.primary.clone());
    let other_paths = if args.others.is_empty() {
        discover_simulated(dir)
            .with_context(|| format!("listing simulated drones in {}", dir.display()))?
    } else {
        args.others.clone()
    };

    let primary = load_trajectory(&primary_path)
        .with_context(|| format!("loading primary trajectory {}", primary_path.display()))?;
    let others = load_trajectories(&other_paths).context("loading simulated trajectories")?;

    tracing::info!(
        primary = %primary.id,
        waypoints = primary.len(),
        others = others.len(),
        spatial = detection.spatial_threshold,
        temporal = detection.temporal_threshold,
        "running conflict detection"
    );

    let execution = if args.parallel {
        Execution::Parallel
    } else {
        Execution::Sequential
    };
    let strategy = Strategy::from(args.strategy);
    let detector: Box<dyn ConflictDetector> = match strategy {
        Strategy::SegmentIndexed => Box::new(
            SegmentIndexedDetector::new(execution).with_expanded_query(args.expand_query),
        ),
        other => other.detector(execution),
    };

    let report = run_detection(detector.as_ref(), &primary, &others, &detection)?;

    if args.json {
        println!("{}", conflicts_json(&report.conflicts)?);
    } else {
        print!("{}", render_summary(&report));
    }

    if let Some(path) = &args.output {
        let body = conflicts_json(&report.conflicts)?;
        fs::write(path, body).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), conflicts = report.conflicts.len(), "wrote conflicts");
    }

    Ok(())
}
