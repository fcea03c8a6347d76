//! Analysis Errors
//!
//! A single error type covers every way an analysis call can fail. All
//! name-resolution failures collect *every* offending name before
//! reporting, never just the first one encountered.

use crate::bootstrap::BootstrapError;
use crate::ols::SolverError;
use thiserror::Error;

/// Errors produced by the analysis entry points
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// A non-empty sample was required
    #[error("Sample is empty")]
    EmptySample,

    /// A regression was requested with no predictor metrics
    #[error("No predictor metrics were specified")]
    NoPredictors,

    /// The same metric appeared more than once across responder and predictors
    #[error("Duplicate metrics: {}", quote_join(.0))]
    DuplicateMetric(Vec<String>),

    /// One or more metric names are not in the registry
    #[error("Unknown metrics: {}", quote_join(.0))]
    UnknownMetric(Vec<String>),

    /// A regression was requested over an empty measurement sequence
    #[error("No measurements were collected")]
    NoMeasurements,

    /// The first measurement record carries no value for these metrics
    #[error("No data available for metrics: {}", quote_join(.0))]
    NoDataAvailable(Vec<String>),

    /// A later measurement record lacked a metric the head record carried
    #[error("Measurement record {record} carries no value for metric \"{metric}\"")]
    MissingMetric {
        /// Zero-based index of the offending record
        record: usize,
        /// Name of the absent metric
        metric: String,
    },

    /// The bootstrap estimator rejected its inputs
    #[error("Bootstrap estimation failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    /// The least-squares solver failed
    #[error("Regression solver failed: {0}")]
    Solver(#[from] SolverError),
}

/// Quote each name and join with ", " for error display
fn quote_join(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("\"{}\"", n))
        .collect::<Vec<_>>()
        .join(", ")
}
