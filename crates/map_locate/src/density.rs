//! Probability density functions evaluated at distances.
//!
//! A rule maps each computed distance through one of these densities to get
//! a per-point score. The results are raw density values, not normalized
//! probability masses: they do not sum to 1 across a grid and can exceed 1
//! for small spreads.
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parameters of a Gaussian density.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianParams {
    /// Mean distance.
    pub mu: f64,
    /// Standard deviation, must be positive.
    pub sigma: f64,
}

/// Parameters of a log-normal density in log space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogNormalParams {
    /// Mean of the underlying normal distribution.
    pub mu_log: f64,
    /// Standard deviation of the underlying normal distribution,
    /// must be positive.
    pub sigma_log: f64,
}

/// Derives log-space parameters from a target mean and mode of the
/// distribution in distance units.
///
/// The derivation uses `var = mean - ln(mode)`, `sigma = sqrt(var)`, then
/// places the density at `mu_log = ln(mean)` with `sigma_log = ln(sigma)`.
/// Fails when `mean <= mode`: the derived variance would not be positive and
/// evaluation would silently produce NaN.
pub fn derive_log_normal_params(mean: f64, mode: f64) -> Result<LogNormalParams> {
    if !mean.is_finite() || !mode.is_finite() || mode <= 0.0 {
        return Err(Error::Domain(format!(
            "log-normal targets must be finite with mode > 0, got mean {mean}, mode {mode}"
        )));
    }
    if mean <= mode {
        return Err(Error::Domain(format!(
            "log-normal target mean ({mean}) must exceed the target mode ({mode})"
        )));
    }

    let variance = mean - mode.ln();
    let sigma_log = variance.sqrt().ln();
    if !(sigma_log > 0.0) {
        return Err(Error::Domain(format!(
            "derived log-normal shape is not positive ({sigma_log}) for mean {mean}, mode {mode}"
        )));
    }

    Ok(LogNormalParams {
        mu_log: mean.ln(),
        sigma_log,
    })
}

/// A density function a rule evaluates at computed distances.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Density {
    Gaussian {
        /// Gaussian parameters.
        params: GaussianParams,
    },
    LogNormal {
        /// Log-space parameters.
        params: LogNormalParams,
    },
}

impl Density {
    /// Creates a Gaussian density with the given mean and standard deviation.
    pub fn gaussian(mu: f64, sigma: f64) -> Self {
        Density::Gaussian {
            params: GaussianParams { mu, sigma },
        }
    }

    /// Creates a log-normal density from target mean and mode in distance
    /// units, failing when the parameters admit no positive variance.
    pub fn log_normal_from_mean_mode(mean: f64, mode: f64) -> Result<Self> {
        Ok(Density::LogNormal {
            params: derive_log_normal_params(mean, mode)?,
        })
    }

    /// Checks the parameters admit a well-defined density.
    pub fn validate(&self) -> Result<()> {
        match self {
            Density::Gaussian { params } => {
                if !params.sigma.is_finite() || params.sigma <= 0.0 {
                    return Err(Error::Domain(format!(
                        "gaussian sigma must be positive and finite, got {}",
                        params.sigma
                    )));
                }
            }
            Density::LogNormal { params } => {
                if !params.sigma_log.is_finite() || params.sigma_log <= 0.0 {
                    return Err(Error::Domain(format!(
                        "log-normal sigma_log must be positive and finite, got {}",
                        params.sigma_log
                    )));
                }
            }
        }
        Ok(())
    }

    /// Evaluates the density at a distance.
    ///
    /// Total for every finite non-negative distance once validated. The
    /// log-normal density is defined to be exactly 0 at distance 0.
    pub fn eval(&self, distance: f64) -> f64 {
        match self {
            Density::Gaussian { params } => gaussian_pdf(distance, params.mu, params.sigma),
            Density::LogNormal { params } => {
                log_normal_pdf(distance, params.mu_log, params.sigma_log)
            }
        }
    }
}

/// Gaussian probability density at `x`.
pub fn gaussian_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * TAU.sqrt())
}

/// Log-normal probability density at `x`; exactly 0 for `x <= 0`.
pub fn log_normal_pdf(x: f64, mu_log: f64, sigma_log: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let z = (x.ln() - mu_log) / sigma_log;
    (-0.5 * z * z).exp() / (x * sigma_log * TAU.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn gaussian_peaks_at_mean() {
        let sigma = 1365.0;
        let peak = gaussian_pdf(0.0, 0.0, sigma);
        approx_eq(peak, 1.0 / (sigma * TAU.sqrt()));
    }

    #[test]
    fn gaussian_decreases_with_distance() {
        let density = Density::gaussian(0.0, 1365.0);
        let mut previous = density.eval(0.0);
        for distance in [10.0, 100.0, 1000.0, 5000.0] {
            let value = density.eval(distance);
            assert!(value < previous, "{value} not below {previous}");
            assert!(value > 0.0);
            previous = value;
        }
    }

    #[test]
    fn log_normal_is_zero_at_zero_distance() {
        let params = derive_log_normal_params(4700.0, 3877.0).expect("valid targets");
        assert_eq!(log_normal_pdf(0.0, params.mu_log, params.sigma_log), 0.0);
        assert_eq!(log_normal_pdf(-1.0, params.mu_log, params.sigma_log), 0.0);
    }

    #[test]
    fn log_normal_is_positive_and_finite_for_positive_distance() {
        let density = Density::log_normal_from_mean_mode(4700.0, 3877.0).expect("valid targets");
        for distance in [0.001, 0.07, 1.0, 4700.0, 1.0e6] {
            let value = density.eval(distance);
            assert!(value.is_finite());
            assert!(value > 0.0, "density at {distance} was {value}");
        }
    }

    #[test]
    fn derive_matches_documented_formula() {
        let params = derive_log_normal_params(4700.0, 3877.0).expect("valid targets");
        approx_eq(params.mu_log, 4700.0_f64.ln());
        approx_eq(params.sigma_log, (4700.0 - 3877.0_f64.ln()).sqrt().ln());
    }

    #[test]
    fn derive_rejects_mean_not_above_mode() {
        assert!(matches!(
            derive_log_normal_params(3877.0, 4700.0),
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            derive_log_normal_params(4700.0, 4700.0),
            Err(Error::Domain(_))
        ));
    }

    #[test]
    fn derive_rejects_nonsense_targets() {
        assert!(derive_log_normal_params(f64::NAN, 1.0).is_err());
        assert!(derive_log_normal_params(2.0, 0.0).is_err());
        assert!(derive_log_normal_params(2.0, -3.0).is_err());
    }

    #[test]
    fn validate_rejects_degenerate_spreads() {
        assert!(Density::gaussian(0.0, 0.0).validate().is_err());
        assert!(Density::gaussian(0.0, -1.0).validate().is_err());
        assert!(Density::gaussian(0.0, 1.0).validate().is_ok());

        let invalid = Density::LogNormal {
            params: LogNormalParams {
                mu_log: 1.0,
                sigma_log: 0.0,
            },
        };
        assert!(invalid.validate().is_err());
    }
}
