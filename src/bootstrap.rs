//! Bootstrap Resampling
//!
//! Percentile-interval bootstrap estimates of the mean and standard
//! deviation of a timing sample. Each analysis call gets freshly
//! entropy-seeded generators scoped to that call; nothing is shared or
//! reused across calls, so independent analyses stay independent.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point estimate with its confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Statistic computed over the original sample
    pub point: f64,
    /// Lower confidence bound
    pub lower_bound: f64,
    /// Upper confidence bound
    pub upper_bound: f64,
    /// Confidence level the bounds were computed at
    pub confidence_level: f64,
}

/// Errors that can occur during bootstrap estimation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BootstrapError {
    /// Too few samples for resampling to say anything
    #[error("not enough samples: got {got}, need at least {min}")]
    NotEnoughSamples {
        /// Samples provided
        got: usize,
        /// Minimum required
        min: usize,
    },

    /// Confidence level outside the open interval (0, 1)
    #[error("invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    /// Zero resamples requested
    #[error("resample count must be positive")]
    NoResamples,
}

/// Bootstrap the mean and standard deviation of a sample
///
/// Draws `resamples` independent resamples (with replacement, same size
/// as the input), computes both statistics on each, and returns
/// `(mean, std_dev)` estimates whose bounds are the percentile interval
/// at `confidence_level`. Point estimates come from the original
/// sample, with the standard deviation using the n-1 denominator.
pub fn bootstrap_estimate(
    sample: &[f64],
    resamples: usize,
    confidence_level: f64,
) -> Result<(Estimate, Estimate), BootstrapError> {
    if sample.len() < 2 {
        return Err(BootstrapError::NotEnoughSamples {
            got: sample.len(),
            min: 2,
        });
    }
    if confidence_level <= 0.0 || confidence_level >= 1.0 {
        return Err(BootstrapError::InvalidConfidenceLevel(confidence_level));
    }
    if resamples == 0 {
        return Err(BootstrapError::NoResamples);
    }

    let point_mean = mean(sample);
    let point_std_dev = std_dev(sample, point_mean);

    // One entropy-seeded generator per worker thread, scoped to this
    // call. Each resample draws n values with replacement and yields
    // both statistics at once.
    let stats: Vec<(f64, f64)> = (0..resamples)
        .into_par_iter()
        .map_init(StdRng::from_entropy, |rng, _| {
            let resample: Vec<f64> = (0..sample.len())
                .map(|_| *sample.choose(rng).unwrap_or(&point_mean))
                .collect();
            let m = mean(&resample);
            (m, std_dev(&resample, m))
        })
        .collect();

    let means: Vec<f64> = stats.iter().map(|(m, _)| *m).collect();
    let std_devs: Vec<f64> = stats.iter().map(|(_, s)| *s).collect();

    let (mean_lower, mean_upper) = percentile_interval(&means, confidence_level);
    let (sd_lower, sd_upper) = percentile_interval(&std_devs, confidence_level);

    Ok((
        Estimate {
            point: point_mean,
            lower_bound: mean_lower,
            upper_bound: mean_upper,
            confidence_level,
        },
        Estimate {
            point: point_std_dev,
            lower_bound: sd_lower,
            upper_bound: sd_upper,
            confidence_level,
        },
    ))
}

fn mean(sample: &[f64]) -> f64 {
    sample.iter().sum::<f64>() / sample.len() as f64
}

fn std_dev(sample: &[f64], mean: f64) -> f64 {
    if sample.len() < 2 {
        return 0.0;
    }
    let variance =
        sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (sample.len() - 1) as f64;
    variance.sqrt()
}

/// Percentile interval over a bootstrap distribution
fn percentile_interval(values: &[f64], confidence: f64) -> (f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let alpha = (1.0 - confidence) / 2.0;
    let lower_idx = ((alpha * n as f64).floor() as usize).min(n - 1);
    let upper_idx = (((1.0 - alpha) * n as f64).floor() as usize).min(n - 1);

    (sorted[lower_idx], sorted[upper_idx])
}
