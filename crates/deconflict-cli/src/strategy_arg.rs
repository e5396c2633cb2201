//! Command-line names for detection strategies.

use clap::ValueEnum;
use deconflict_core::Strategy;

/// Detection strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Every waypoint pair, no index
    BruteForce,
    /// R-tree radius queries over primary waypoints
    PointIndexed,
    /// R-tree box queries over primary segments, exact distance, deduplicated
    SegmentIndexed,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::BruteForce => Strategy::BruteForce,
            StrategyArg::PointIndexed => Strategy::PointIndexed,
            StrategyArg::SegmentIndexed => Strategy::SegmentIndexed,
        }
    }
}

impl From<Strategy> for StrategyArg {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::BruteForce => StrategyArg::BruteForce,
            Strategy::PointIndexed => StrategyArg::PointIndexed,
            Strategy::SegmentIndexed => StrategyArg::SegmentIndexed,
        }
    }
}
