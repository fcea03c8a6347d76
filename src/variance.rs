//! Outlier Variance Modeling
//!
//! Estimates how much of the variance reported by the bootstrap is
//! explained by outliers rather than by the underlying distribution.
//! Follows the minimum-variance attribution model: find the smallest
//! contaminated-measurement count consistent with the observed bootstrap
//! variance and report the variance fraction those measurements explain.

use crate::bootstrap::Estimate;
use serde::{Deserialize, Serialize};

/// Severity of the outlier effect on the variance, in increasing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OutlierEffect {
    /// Outliers explain less than 1% of the variance
    Unaffected,
    /// Outliers explain less than 10% of the variance
    Slight,
    /// Outliers explain less than 50% of the variance
    Moderate,
    /// Outliers dominate the variance
    Severe,
}

/// How strongly outliers inflate the estimated variance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierVariance {
    /// Severity classification of `fraction`
    pub effect: OutlierEffect,
    /// Adjective form of the effect, for notice formatting
    pub description: String,
    /// Fraction of the observed variance attributed to outliers
    pub fraction: f64,
}

/// Estimate the effect of outliers on the variance of a sample
///
/// `mean_est` and `std_dev_est` are the bootstrap estimates over the
/// time sample; `n` is the original (pre-resampling) sample size.
///
/// The formula nests two minimizations: the contaminated count is
/// bounded by `cMax` evaluated at both zero and half the per-sample
/// mean, and the resulting variance is taken at both that bound and a
/// single contaminated measurement. The nesting order is part of the
/// model; do not collapse it algebraically.
///
/// When the measured standard deviation is zero the fraction is
/// undefined; zero variance leaves nothing to attribute to outliers, so
/// the result is `Unaffected` with fraction 0.0.
pub fn outlier_variance(mean_est: &Estimate, std_dev_est: &Estimate, n: f64) -> OutlierVariance {
    let a = n;
    let sigma_b = std_dev_est.point;

    if sigma_b == 0.0 {
        return OutlierVariance {
            effect: OutlierEffect::Unaffected,
            description: "no".to_string(),
            fraction: 0.0,
        };
    }

    let mu_a = mean_est.point / a;
    let mu_g_min = mu_a / 2.0;
    let sigma_g = (mu_g_min / 4.0).min(sigma_b / a.sqrt());
    let sigma_g2 = sigma_g * sigma_g;
    let sigma_b2 = sigma_b * sigma_b;

    let c_max = |x: f64| -> f64 {
        let d = (mu_a - x) * (mu_a - x);
        let ad = a * d;
        let k0 = -a * ad;
        let k1 = sigma_b2 - a * sigma_g2 + ad;
        let det = k1 * k1 - 4.0 * sigma_g2 * k0;
        (-2.0 * k0 / (k1 + det.sqrt())).floor()
    };

    let var_out = |c: f64| -> f64 {
        let ac = a - c;
        (ac / a) * (sigma_b2 - ac * sigma_g2)
    };

    let x = c_max(0.0).min(c_max(mu_g_min));
    let var_out_min = var_out(1.0).min(var_out(x)) / sigma_b2;

    let (effect, description) = if var_out_min < 0.01 {
        (OutlierEffect::Unaffected, "no")
    } else if var_out_min < 0.1 {
        (OutlierEffect::Slight, "slight")
    } else if var_out_min < 0.5 {
        (OutlierEffect::Moderate, "moderate")
    } else {
        (OutlierEffect::Severe, "severe")
    };

    OutlierVariance {
        effect,
        description: description.to_string(),
        fraction: var_out_min,
    }
}
