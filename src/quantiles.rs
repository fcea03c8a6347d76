//! Quantile Computation
//!
//! Weighted-average interpolation between order statistics. This is the
//! interpolation rule used for the quartiles that anchor the outlier
//! fences, so the classifier and any caller-side percentile reporting
//! agree on what "Q1" and "Q3" mean.

/// Compute the quantile `p` (in `[0, 1]`) of a sample
///
/// Sorts a copy of the sample and linearly interpolates between the two
/// order statistics straddling rank `p * (n - 1)`.
///
/// Returns 0.0 for an empty sample; entry points validate non-emptiness
/// before reaching this.
pub fn quantile(sample: &[f64], p: f64) -> f64 {
    if sample.is_empty() {
        return 0.0;
    }

    if sample.len() == 1 {
        return sample[0];
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    sorted_quantile(&sorted, p)
}

/// Quantile over an already-sorted sample
///
/// Callers that need several quantiles of the same data sort once and
/// use this directly.
pub(crate) fn sorted_quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lower_idx = rank.floor() as usize;
    let upper_idx = (lower_idx + 1).min(n - 1);
    let fraction = rank - lower_idx as f64;

    sorted[lower_idx] + fraction * (sorted[upper_idx] - sorted[lower_idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        let sample = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((quantile(&sample, 0.5) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_quartiles_interpolate() {
        let sample = vec![1.0, 2.0, 3.0, 4.0];
        // rank 0.25 * 3 = 0.75 -> 1.0 + 0.75 * (2.0 - 1.0)
        assert!((quantile(&sample, 0.25) - 1.75).abs() < 1e-12);
        // rank 0.75 * 3 = 2.25 -> 3.0 + 0.25 * (4.0 - 3.0)
        assert!((quantile(&sample, 0.75) - 3.25).abs() < 1e-12);
    }

    #[test]
    fn test_unsorted_input() {
        let sample = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        assert!((quantile(&sample, 0.0) - 1.0).abs() < 1e-12);
        assert!((quantile(&sample, 1.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value() {
        assert!((quantile(&[42.0], 0.75) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_sample() {
        let sample: Vec<f64> = Vec::new();
        assert!((quantile(&sample, 0.5) - 0.0).abs() < f64::EPSILON);
    }
}
