#![warn(missing_docs)]
//! Benchstat - Statistical Analysis for Benchmark Measurements
//!
//! The analytical core of a benchmarking harness. Given the raw
//! per-iteration measurements collected for one benchmark, it produces:
//! - Outlier classification via the boxplot (Tukey fence) method
//! - A model of how much outliers inflate the estimated mean/stddev
//! - Linear regressions attributing measured cost to named metrics
//!   (e.g. iteration count)
//! - Bootstrap confidence intervals for mean and standard deviation
//! - A kernel density estimate of the timing distribution
//!
//! The crate collects nothing itself: measurement gathering, iteration
//! control and report rendering live in the surrounding harness.

mod analysis;
mod bootstrap;
mod error;
mod kde;
mod metrics;
mod ols;
mod outliers;
mod quantiles;
mod regression;
mod variance;

pub use analysis::{analyse_sample, AnalysisConfig, Report, SampleAnalysis};
pub use bootstrap::{bootstrap_estimate, BootstrapError, Estimate};
pub use error::AnalysisError;
pub use kde::{kernel_density_estimate, DensityEstimate};
pub use metrics::{
    metric_names, rescale, resolve_accessors, validate_accessors, Accessor, Measured,
};
pub use ols::{ols_regress, OlsFit, SolverError};
pub use outliers::{classify, describe_outliers, Outliers};
pub use quantiles::quantile;
pub use regression::{regress, Regression, RegressionSpec};
pub use variance::{outlier_variance, OutlierEffect, OutlierVariance};

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 100_000;

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Number of grid points for kernel density estimation
pub const KDE_GRID_POINTS: usize = 128;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_RESAMPLES, 100_000);
        assert!((DEFAULT_CONFIDENCE_LEVEL - 0.95).abs() < f64::EPSILON);
        assert_eq!(KDE_GRID_POINTS, 128);
    }
}
