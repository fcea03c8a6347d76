//! Outlier Classification
//!
//! Boxplot (Tukey fence) classification of a timing sample. Values are
//! bucketed by distance from the quartiles: beyond 1.5 IQR is a mild
//! outlier, beyond 3 IQR a severe one, on either side.
//!
//! Counts form a commutative monoid under bucket-wise addition, so
//! classifications of disjoint subsets taken against the same fences can
//! be merged in any order.

use crate::error::AnalysisError;
use crate::quantiles::sorted_quantile;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Outlier counts for one classified sample
///
/// The four buckets are mutually exclusive: a single value lands in at
/// most one of them. `samples_seen` counts every classified value,
/// outlier or not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outliers {
    /// Total number of values classified
    pub samples_seen: u64,
    /// Values at or below Q1 - 3 IQR
    pub low_severe: u64,
    /// Values between Q1 - 3 IQR and Q1 - 1.5 IQR
    pub low_mild: u64,
    /// Values between Q3 + 1.5 IQR and Q3 + 3 IQR
    pub high_mild: u64,
    /// Values at or above Q3 + 3 IQR
    pub high_severe: u64,
}

impl Outliers {
    /// Total number of values that landed in an outlier bucket
    pub fn count(&self) -> u64 {
        self.low_severe + self.low_mild + self.high_mild + self.high_severe
    }
}

impl Add for Outliers {
    type Output = Outliers;

    fn add(self, rhs: Outliers) -> Outliers {
        Outliers {
            samples_seen: self.samples_seen + rhs.samples_seen,
            low_severe: self.low_severe + rhs.low_severe,
            low_mild: self.low_mild + rhs.low_mild,
            high_mild: self.high_mild + rhs.high_mild,
            high_severe: self.high_severe + rhs.high_severe,
        }
    }
}

impl AddAssign for Outliers {
    fn add_assign(&mut self, rhs: Outliers) {
        *self = *self + rhs;
    }
}

impl Sum for Outliers {
    fn sum<I: Iterator<Item = Outliers>>(iter: I) -> Outliers {
        iter.fold(Outliers::default(), Add::add)
    }
}

/// Classify every value of a sample against its boxplot fences
///
/// Fences derive from the first and third quartiles:
/// severe beyond 3 IQR, mild beyond 1.5 IQR. When the IQR collapses to
/// zero the fences coincide; the secondary guards on the severe buckets
/// keep a value from being counted twice in that case.
pub fn classify(sample: &[f64]) -> Result<Outliers, AnalysisError> {
    if sample.is_empty() {
        return Err(AnalysisError::EmptySample);
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = sorted_quantile(&sorted, 0.25);
    let q3 = sorted_quantile(&sorted, 0.75);
    let iqr = q3 - q1;

    let lo_severe = q1 - 3.0 * iqr;
    let lo_mild = q1 - 1.5 * iqr;
    let hi_mild = q3 + 1.5 * iqr;
    let hi_severe = q3 + 3.0 * iqr;

    let mut outliers = Outliers {
        samples_seen: sample.len() as u64,
        ..Outliers::default()
    };

    for &v in sample {
        if v <= lo_severe && v < hi_mild {
            outliers.low_severe += 1;
        } else if v > lo_severe && v <= lo_mild {
            outliers.low_mild += 1;
        } else if v >= hi_severe && v > lo_mild {
            outliers.high_severe += 1;
        } else if v >= hi_mild && v < hi_severe {
            outliers.high_mild += 1;
        }
    }

    Ok(outliers)
}

/// Format outlier counts into human-readable notices
///
/// Returns nothing when no value was classified as an outlier.
/// Otherwise the first notice summarizes the total; per-bucket notices
/// follow for severe buckets with any members and for mild buckets
/// holding more than 1% of the sample.
pub fn describe_outliers(outliers: &Outliers) -> Vec<String> {
    let total = outliers.count();
    if total == 0 {
        return Vec::new();
    }

    let seen = outliers.samples_seen as f64;
    let percent = |n: u64| 100.0 * n as f64 / seen;

    let mut notices = vec![format!(
        "Found {} outliers among {} measurements ({:.2}%)",
        total, outliers.samples_seen, percent(total)
    )];

    let buckets = [
        (outliers.low_severe, "low severe", 0.0),
        (outliers.low_mild, "low mild", 1.0),
        (outliers.high_mild, "high mild", 1.0),
        (outliers.high_severe, "high severe", 0.0),
    ];
    for (count, label, threshold) in buckets {
        if count > 0 && percent(count) > threshold {
            notices.push(format!("  {} ({:.2}%) {}", count, percent(count), label));
        }
    }

    notices
}
