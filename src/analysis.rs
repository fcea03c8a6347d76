//! Sample Analysis Pipeline
//!
//! The top-level orchestration: runs every requested regression, then
//! bootstraps mean/stddev estimates of the per-iteration time sample,
//! models the outlier contamination of those estimates, classifies the
//! outliers themselves, and attaches a density curve. The result is one
//! immutable `Report` per analyzed benchmark.
//!
//! Calls are independent: each owns its randomness and reads only its
//! inputs, so reports for separate benchmarks can be computed in
//! parallel by the caller.

use crate::bootstrap::{bootstrap_estimate, Estimate};
use crate::error::AnalysisError;
use crate::kde::{kernel_density_estimate, DensityEstimate};
use crate::metrics::{metric_names, rescale, Measured};
use crate::outliers::{classify, Outliers};
use crate::regression::{regress, Regression, RegressionSpec};
use crate::variance::{outlier_variance, OutlierVariance};
use crate::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_RESAMPLES, KDE_GRID_POINTS};
use serde::{Deserialize, Serialize};

/// Tunables for one analysis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Confidence level for bootstrap intervals, in (0, 1)
    pub confidence_level: f64,
    /// Number of bootstrap resamples
    pub resamples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            resamples: DEFAULT_RESAMPLES,
        }
    }
}

/// Statistical summary of one benchmark's sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleAnalysis {
    /// Fitted regressions, implicit `time ~ iters` first
    pub regressions: Vec<Regression>,
    /// Bootstrap estimate of the per-iteration mean time
    pub mean_estimate: Estimate,
    /// Bootstrap estimate of the per-iteration time stddev
    pub std_dev_estimate: Estimate,
    /// How much of the variance outliers explain
    pub outlier_variance: OutlierVariance,
}

/// Complete analysis output for one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Position of this benchmark in the run
    pub index: usize,
    /// Benchmark name
    pub name: String,
    /// Canonical list of metric names this crate understands
    pub metrics: Vec<String>,
    /// The raw measurements the analysis was computed from
    pub measurements: Vec<Measured>,
    /// Regression and bootstrap summary
    pub analysis: SampleAnalysis,
    /// Outlier classification of the time sample
    pub outliers: Outliers,
    /// Density curves (one KDE over the time sample)
    pub densities: Vec<DensityEstimate>,
}

/// Analyze the measurements collected for one benchmark
///
/// The implicit `time ~ iters` regression always runs first;
/// caller-supplied specs follow in order and the first failure aborts
/// the call before any bootstrap or density work starts. The time
/// sample is the per-iteration (rescaled) time of every measurement.
pub fn analyse_sample(
    index: usize,
    name: &str,
    regression_specs: &[RegressionSpec],
    measurements: &[Measured],
    config: &AnalysisConfig,
) -> Result<Report, AnalysisError> {
    let default_spec = RegressionSpec::new(&["iters"], "time");

    let mut regressions = Vec::with_capacity(regression_specs.len() + 1);
    for spec in std::iter::once(&default_spec).chain(regression_specs) {
        let predictors: Vec<&str> = spec.predictors.iter().map(|s| s.as_str()).collect();
        regressions.push(regress(&predictors, &spec.responder, measurements)?);
    }

    let time_sample: Vec<f64> = measurements.iter().map(|m| rescale(m).time_ns).collect();

    let (mean_estimate, std_dev_estimate) =
        bootstrap_estimate(&time_sample, config.resamples, config.confidence_level)?;

    let variance = outlier_variance(
        &mean_estimate,
        &std_dev_estimate,
        time_sample.len() as f64,
    );

    let outliers = classify(&time_sample)?;

    let density = kernel_density_estimate(&time_sample, KDE_GRID_POINTS);

    Ok(Report {
        index,
        name: name.to_string(),
        metrics: metric_names(),
        measurements: measurements.to_vec(),
        analysis: SampleAnalysis {
            regressions,
            mean_estimate,
            std_dev_estimate,
            outlier_variance: variance,
        },
        outliers,
        densities: vec![density],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(n: usize) -> Vec<Measured> {
        // Per-iteration time ~100ns with mild jitter.
        (1..=n)
            .map(|i| {
                let iters = i as f64;
                Measured::timing_only(iters * 100.0 + (i % 3) as f64, iters)
            })
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert!((config.confidence_level - 0.95).abs() < f64::EPSILON);
        assert_eq!(config.resamples, 100_000);
    }

    #[test]
    fn test_implicit_regression_always_present() {
        let config = AnalysisConfig {
            resamples: 200,
            ..AnalysisConfig::default()
        };
        let report = analyse_sample(0, "push", &[], &measurements(20), &config).unwrap();

        assert_eq!(report.analysis.regressions.len(), 1);
        let implicit = &report.analysis.regressions[0];
        assert_eq!(implicit.responder, "time");
        assert!(implicit.coefficients.contains_key("iters"));
        assert!(implicit.coefficients.contains_key("y"));
    }

    #[test]
    fn test_failing_spec_aborts() {
        let config = AnalysisConfig {
            resamples: 200,
            ..AnalysisConfig::default()
        };
        let specs = vec![RegressionSpec::new(&["nope"], "time")];
        let err = analyse_sample(0, "push", &specs, &measurements(20), &config).unwrap_err();

        assert_eq!(err, AnalysisError::UnknownMetric(vec!["nope".to_string()]));
    }

    #[test]
    fn test_empty_measurements_fail_before_bootstrap() {
        let config = AnalysisConfig::default();
        let err = analyse_sample(0, "push", &[], &[], &config).unwrap_err();
        assert_eq!(err, AnalysisError::NoMeasurements);
    }

    #[test]
    fn test_report_assembly() {
        let config = AnalysisConfig {
            resamples: 500,
            ..AnalysisConfig::default()
        };
        let input = measurements(30);
        let report = analyse_sample(3, "decode", &[], &input, &config).unwrap();

        assert_eq!(report.index, 3);
        assert_eq!(report.name, "decode");
        assert_eq!(report.metrics, metric_names());
        assert_eq!(report.measurements, input);
        assert_eq!(report.outliers.samples_seen, 30);
        assert_eq!(report.densities.len(), 1);
        assert_eq!(report.densities[0].xs.len(), KDE_GRID_POINTS);
        // Per-iteration time is ~100ns.
        assert!((report.analysis.mean_estimate.point - 100.0).abs() < 5.0);
    }
}
