//! Deconfliction CLI support: environment configuration, strategy names,
//! summary rendering and JSON export.
//!
//! The `deconflict` binary loads a primary trajectory and a set of simulated
//! trajectories from CSV, runs one detection strategy and reports the result.

pub mod config;
pub mod strategy_arg;
pub mod summary;

pub use config::Config;
pub use strategy_arg::StrategyArg;
pub use summary::{conflicts_json, render_summary};
