//! Kernel Density Estimation
//!
//! Smooths a timing sample into a density curve for plotting. Gaussian
//! kernel with Silverman's rule-of-thumb bandwidth, evaluated over an
//! evenly spaced grid spanning the sample plus three bandwidths of
//! margin on each side.

use serde::{Deserialize, Serialize};

/// A density curve sampled on an evenly spaced grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityEstimate {
    /// Grid point positions
    pub xs: Vec<f64>,
    /// Estimated density at each grid point
    pub ys: Vec<f64>,
}

/// Estimate the probability density of a sample on `grid_points` points
///
/// Returns an empty curve for an empty sample. A sample with zero
/// spread would give a zero Silverman bandwidth; a small positive
/// fallback keeps the curve finite in that case.
pub fn kernel_density_estimate(sample: &[f64], grid_points: usize) -> DensityEstimate {
    if sample.is_empty() || grid_points == 0 {
        return DensityEstimate {
            xs: Vec::new(),
            ys: Vec::new(),
        };
    }

    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let variance = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    // Silverman's rule of thumb.
    let bandwidth = if std_dev > 0.0 {
        1.06 * std_dev * n.powf(-0.2)
    } else {
        let scale = mean.abs().max(1.0);
        1e-3 * scale
    };

    let min = sample
        .iter()
        .cloned()
        .fold(f64::INFINITY, f64::min);
    let max = sample
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 3.0 * bandwidth;
    let hi = max + 3.0 * bandwidth;

    let step = if grid_points > 1 {
        (hi - lo) / (grid_points - 1) as f64
    } else {
        0.0
    };

    let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * bandwidth * n);
    let xs: Vec<f64> = (0..grid_points).map(|i| lo + step * i as f64).collect();
    let ys: Vec<f64> = xs
        .iter()
        .map(|&x| {
            sample
                .iter()
                .map(|&v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect();

    DensityEstimate { xs, ys }
}
