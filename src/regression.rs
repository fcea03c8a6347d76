//! Metric Regressions
//!
//! Builds a design matrix from named metrics and delegates the fit to
//! the least-squares solver. The classic benchmark regression is
//! `time ~ iters`: its slope is the per-iteration cost and its R²
//! says how linear the measurements actually were.

use crate::error::AnalysisError;
use crate::metrics::{validate_accessors, Accessor, Measured};
use crate::ols::ols_regress;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One regression request: predictor metric names and a responder name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionSpec {
    /// Metric names used as predictors
    pub predictors: Vec<String>,
    /// Metric name being explained
    pub responder: String,
}

impl RegressionSpec {
    /// Convenience constructor from string slices
    pub fn new(predictors: &[&str], responder: &str) -> Self {
        Self {
            predictors: predictors.iter().map(|s| s.to_string()).collect(),
            responder: responder.to_string(),
        }
    }
}

/// A fitted linear model over named metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    /// Metric the model explains
    pub responder: String,
    /// Coefficient per predictor name, plus `"y"` for the intercept
    pub coefficients: BTreeMap<String, f64>,
    /// Coefficient of determination of the fit
    pub r_square: f64,
}

/// Fit `responder ~ predictors` over a measurement sequence
///
/// Validates the metric names, checks that the first record carries a
/// value for every requested metric (reporting every absent one), then
/// extracts one column per metric and solves. A record further into
/// the sequence missing a metric the head record carried fails with
/// `MissingMetric` naming the record and metric, rather than being
/// silently skipped or unwrapped.
pub fn regress(
    predictor_names: &[&str],
    responder_name: &str,
    measurements: &[Measured],
) -> Result<Regression, AnalysisError> {
    if measurements.is_empty() {
        return Err(AnalysisError::NoMeasurements);
    }

    // Responder-first, matching column extraction order below.
    let accessors = validate_accessors(predictor_names, responder_name)?;

    let head = &measurements[0];
    let missing: Vec<String> = accessors
        .iter()
        .filter(|(_, accessor)| accessor(head).is_none())
        .map(|(name, _)| name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(AnalysisError::NoDataAvailable(missing));
    }

    let mut columns = Vec::with_capacity(accessors.len());
    for (name, accessor) in &accessors {
        columns.push(extract_column(name, *accessor, measurements)?);
    }
    let responder_column = columns.remove(0);

    let fit = ols_regress(&columns, &responder_column)?;

    let mut coefficients = BTreeMap::new();
    for (name, value) in predictor_names.iter().zip(&fit.coefficients) {
        coefficients.insert(name.to_string(), *value);
    }
    coefficients.insert("y".to_string(), fit.coefficients[predictor_names.len()]);

    Ok(Regression {
        responder: responder_name.to_string(),
        coefficients,
        r_square: fit.r_square,
    })
}

/// Extract one metric column, failing on the first record without a value
fn extract_column(
    name: &str,
    accessor: Accessor,
    measurements: &[Measured],
) -> Result<Vec<f64>, AnalysisError> {
    measurements
        .iter()
        .enumerate()
        .map(|(record, m)| {
            accessor(m).ok_or_else(|| AnalysisError::MissingMetric {
                record,
                metric: name.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Measured;

    fn linear_records() -> Vec<Measured> {
        vec![
            Measured::timing_only(1.0, 1.0),
            Measured::timing_only(2.0, 2.0),
            Measured::timing_only(3.0, 3.0),
        ]
    }

    #[test]
    fn test_perfect_iters_fit() {
        let regression = regress(&["iters"], "time", &linear_records()).unwrap();

        assert_eq!(regression.responder, "time");
        assert!((regression.coefficients["iters"] - 1.0).abs() < 1e-9);
        assert!(regression.coefficients["y"].abs() < 1e-9);
        assert!((regression.r_square - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_measurements() {
        assert_eq!(
            regress(&["iters"], "time", &[]).unwrap_err(),
            AnalysisError::NoMeasurements
        );
    }

    #[test]
    fn test_no_predictors_regardless_of_measurements() {
        assert_eq!(
            regress(&[], "time", &linear_records()).unwrap_err(),
            AnalysisError::NoPredictors
        );
        // Empty measurements wins first, but empty predictors with
        // populated measurements must still fail.
        assert_eq!(
            regress(&[], "time", &[]).unwrap_err(),
            AnalysisError::NoMeasurements
        );
    }

    #[test]
    fn test_validation_failure_propagated() {
        let err = regress(&["bogus"], "time", &linear_records()).unwrap_err();
        assert_eq!(err, AnalysisError::UnknownMetric(vec!["bogus".to_string()]));
    }

    #[test]
    fn test_head_record_missing_metrics_all_listed() {
        // cycles and alloc_bytes absent from the head record.
        let records = vec![Measured::timing_only(1.0, 1.0)];
        let err = regress(&["cycles", "alloc_bytes"], "time", &records).unwrap_err();

        assert_eq!(
            err,
            AnalysisError::NoDataAvailable(vec![
                "cycles".to_string(),
                "alloc_bytes".to_string()
            ])
        );
    }

    #[test]
    fn test_later_record_missing_metric_is_typed_error() {
        let mut records = vec![
            Measured {
                cycles: Some(10.0),
                ..Measured::timing_only(1.0, 1.0)
            },
            Measured {
                cycles: Some(20.0),
                ..Measured::timing_only(2.0, 2.0)
            },
            Measured::timing_only(3.0, 3.0),
        ];
        records[2].cycles = None; // explicit: head check passes, record 2 fails

        let err = regress(&["cycles"], "time", &records).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MissingMetric {
                record: 2,
                metric: "cycles".to_string(),
            }
        );
    }

    #[test]
    fn test_coefficient_map_keys() {
        let records: Vec<Measured> = (1..=5)
            .map(|i| Measured {
                cycles: Some(3.0 * i as f64 + (i % 2) as f64),
                ..Measured::timing_only(2.0 * i as f64, i as f64)
            })
            .collect();

        let regression = regress(&["iters", "cycles"], "time", &records).unwrap();
        let keys: Vec<&str> = regression.coefficients.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["cycles", "iters", "y"]);
    }
}
