//! Probability-distribution capability and its normal implementation.
//!
//! The pricer depends on the [`ContinuousDistribution`] capability rather
//! than a concrete type, so further distributions (log-normal, Student-t)
//! can slot in without touching the pricing code.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::core::ModelError;
use crate::math::{normal_cdf, normal_pdf};

/// Capability set of a univariate continuous distribution.
pub trait ContinuousDistribution {
    /// Probability density at `x`.
    fn pdf(&self, x: f64) -> f64;
    /// Cumulative probability at `x`, in `[0, 1]`.
    fn cdf(&self, x: f64) -> f64;
    /// One draw from the process-local random source.
    fn sample(&self) -> f64;
}

/// Normal distribution with mean `mu` and standard deviation `sigma`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Builds a Normal(mu, sigma); `sigma` must be finite and strictly
    /// positive.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, ModelError> {
        if !(mu.is_finite() && sigma.is_finite()) {
            return Err(ModelError::InvalidParameter(
                "normal parameters must be finite".to_string(),
            ));
        }
        if sigma <= 0.0 {
            return Err(ModelError::InvalidParameter(
                "normal sigma must be > 0".to_string(),
            ));
        }
        Ok(Self { mu, sigma })
    }

    /// The standard normal, mean 0 and standard deviation 1.
    pub fn standard() -> Self {
        Self {
            mu: 0.0,
            sigma: 1.0,
        }
    }

    /// Mean parameter.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Standard-deviation parameter.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// One draw using a caller-supplied generator, for reproducible runs.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.mu + self.sigma * z
    }
}

impl Default for Normal {
    fn default() -> Self {
        Self::standard()
    }
}

impl ContinuousDistribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        normal_pdf((x - self.mu) / self.sigma) / self.sigma
    }

    fn cdf(&self, x: f64) -> f64 {
        normal_cdf((x - self.mu) / self.sigma)
    }

    fn sample(&self) -> f64 {
        self.sample_with(&mut rand::rng())
    }
}
