//! Error types for the deconfliction core.

use thiserror::Error;

/// Invalid detection configuration. Raised before any detection work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{name} must be positive, got {value}")]
    NonPositiveThreshold { name: &'static str, value: f64 },

    #[error("{name} must be a finite number")]
    NonFiniteThreshold { name: &'static str },
}

/// Failures while reading a trajectory from CSV.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed waypoint record in {trajectory}: {source}")]
    Csv {
        trajectory: String,
        #[source]
        source: csv::Error,
    },

    #[error("{trajectory} row {row}: unparseable timestamp {value:?}")]
    Timestamp {
        trajectory: String,
        row: usize,
        value: String,
    },

    #[error("{trajectory} row {row}: timestamps must be strictly increasing")]
    NonIncreasingTimestamp { trajectory: String, row: usize },
}
