//! Measurement Records and the Metric Registry
//!
//! A `Measured` record holds the named numeric metrics captured for one
//! benchmark run: wall-clock time, iteration count, and the optional
//! hardware/allocator counters the worker may or may not have been able
//! to collect. Metrics are addressed by name through a fixed registry of
//! accessor functions, so regression specs can refer to them as strings
//! and fail with typed errors when a name does not resolve.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// Metrics recorded for one benchmark measurement
///
/// Time is in nanoseconds and covers `iters` iterations of the
/// benchmark body; `rescale` converts to per-iteration values. Counter
/// metrics are `None` when the platform or configuration did not
/// collect them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measured {
    /// Wall-clock duration of the run, in nanoseconds
    pub time_ns: f64,
    /// Number of benchmark iterations the run covered
    pub iters: f64,
    /// CPU cycles consumed, when a cycle counter is available
    pub cycles: Option<f64>,
    /// Bytes allocated, when allocation tracking is enabled
    pub alloc_bytes: Option<f64>,
    /// Number of allocations, when allocation tracking is enabled
    pub alloc_count: Option<f64>,
}

impl Measured {
    /// Create a timing-only record (no counter metrics)
    pub fn timing_only(time_ns: f64, iters: f64) -> Self {
        Self {
            time_ns,
            iters,
            cycles: None,
            alloc_bytes: None,
            alloc_count: None,
        }
    }
}

/// Extracts one optional named metric from a measurement record
pub type Accessor = fn(&Measured) -> Option<f64>;

/// Fixed name -> accessor table covering every metric this crate understands
static METRICS: &[(&str, Accessor)] = &[
    ("time", |m| Some(m.time_ns)),
    ("iters", |m| Some(m.iters)),
    ("cycles", |m| m.cycles),
    ("alloc_bytes", |m| m.alloc_bytes),
    ("alloc_count", |m| m.alloc_count),
];

/// Canonical list of known metric names, in registry order
pub fn metric_names() -> Vec<String> {
    METRICS.iter().map(|(name, _)| name.to_string()).collect()
}

/// Normalize a record to per-iteration values
///
/// Divides the time-like and allocation metrics by the iteration count;
/// the iteration count itself is left untouched so it stays usable as a
/// regression predictor.
pub fn rescale(measured: &Measured) -> Measured {
    let iters = measured.iters;
    let per_iter = |v: Option<f64>| v.map(|x| x / iters);

    Measured {
        time_ns: measured.time_ns / iters,
        iters,
        cycles: per_iter(measured.cycles),
        alloc_bytes: per_iter(measured.alloc_bytes),
        alloc_count: per_iter(measured.alloc_count),
    }
}

/// Resolve metric names to accessors
///
/// Either every name resolves and the pairs come back in input order,
/// or the call fails with `UnknownMetric` listing every name that is
/// absent from the registry.
pub fn resolve_accessors(
    names: &[&str],
) -> Result<Vec<(String, Accessor)>, AnalysisError> {
    let mut resolved = Vec::with_capacity(names.len());
    let mut unknown = Vec::new();

    for name in names {
        match METRICS.iter().find(|(known, _)| known == name) {
            Some((known, accessor)) => resolved.push((known.to_string(), *accessor)),
            None => unknown.push(name.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(AnalysisError::UnknownMetric(unknown));
    }

    Ok(resolved)
}

/// Validate a regression's metric names and resolve them responder-first
///
/// Fails `NoPredictors` when no predictor is given and
/// `DuplicateMetric` when any name appears more than once across the
/// responder and predictors (case-sensitive, every duplicate listed).
pub fn validate_accessors(
    predictor_names: &[&str],
    responder_name: &str,
) -> Result<Vec<(String, Accessor)>, AnalysisError> {
    if predictor_names.is_empty() {
        return Err(AnalysisError::NoPredictors);
    }

    let mut all = Vec::with_capacity(predictor_names.len() + 1);
    all.push(responder_name);
    all.extend_from_slice(predictor_names);

    let mut duplicates: Vec<String> = Vec::new();
    for (i, name) in all.iter().enumerate() {
        if all[..i].contains(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }
    if !duplicates.is_empty() {
        return Err(AnalysisError::DuplicateMetric(duplicates));
    }

    resolve_accessors(&all)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> Measured {
        Measured {
            time_ns: 1000.0,
            iters: 10.0,
            cycles: Some(3000.0),
            alloc_bytes: Some(640.0),
            alloc_count: Some(20.0),
        }
    }

    #[test]
    fn test_registry_covers_canonical_names() {
        assert_eq!(
            metric_names(),
            vec!["time", "iters", "cycles", "alloc_bytes", "alloc_count"]
        );
    }

    #[test]
    fn test_accessors_extract_values() {
        let m = full_record();
        let resolved = resolve_accessors(&["time", "cycles", "alloc_count"]).unwrap();

        assert_eq!(resolved[0].0, "time");
        assert_eq!((resolved[0].1)(&m), Some(1000.0));
        assert_eq!((resolved[1].1)(&m), Some(3000.0));
        assert_eq!((resolved[2].1)(&m), Some(20.0));
    }

    #[test]
    fn test_optional_metrics_absent() {
        let m = Measured::timing_only(500.0, 5.0);
        let resolved = resolve_accessors(&["cycles", "alloc_bytes"]).unwrap();

        assert_eq!((resolved[0].1)(&m), None);
        assert_eq!((resolved[1].1)(&m), None);
    }

    #[test]
    fn test_unknown_names_all_reported() {
        let err = resolve_accessors(&["foo", "time", "bar"]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::UnknownMetric(vec!["foo".to_string(), "bar".to_string()])
        );
    }

    #[test]
    fn test_validate_rejects_empty_predictors() {
        assert_eq!(
            validate_accessors(&[], "time").unwrap_err(),
            AnalysisError::NoPredictors
        );
    }

    #[test]
    fn test_validate_reports_duplicates() {
        // "time" appears as responder and twice as predictor: one
        // duplicate entry, listed once.
        let err = validate_accessors(&["time", "time"], "time").unwrap_err();
        assert_eq!(err, AnalysisError::DuplicateMetric(vec!["time".to_string()]));

        let err = validate_accessors(&["iters", "iters", "cycles", "cycles"], "time").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::DuplicateMetric(vec!["iters".to_string(), "cycles".to_string()])
        );
    }

    #[test]
    fn test_validate_resolves_responder_first() {
        let resolved = validate_accessors(&["iters", "cycles"], "time").unwrap();
        let names: Vec<&str> = resolved.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["time", "iters", "cycles"]);
    }

    #[test]
    fn test_rescale_divides_by_iters() {
        let scaled = rescale(&full_record());

        assert!((scaled.time_ns - 100.0).abs() < 1e-12);
        assert!((scaled.iters - 10.0).abs() < f64::EPSILON);
        assert_eq!(scaled.cycles, Some(300.0));
        assert_eq!(scaled.alloc_bytes, Some(64.0));
        assert_eq!(scaled.alloc_count, Some(2.0));
    }

    #[test]
    fn test_rescale_preserves_absent_metrics() {
        let scaled = rescale(&Measured::timing_only(500.0, 5.0));

        assert!((scaled.time_ns - 100.0).abs() < 1e-12);
        assert_eq!(scaled.cycles, None);
    }
}
