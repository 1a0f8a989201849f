//! Surface SVI in the power-law parametrization.
//!
//! Three scalars (rho, nu, gamma) describe a whole surface: for every ATM
//! total variance theta the power law `phi(theta) = nu theta^gamma` shapes one
//! smile, and the surface total variance is
//!
//! `w(k, theta) = theta/2 (1 + rho phi k + sqrt((phi k + rho)^2 + 1 - rho^2))`.
//!
//! Each (theta, t) pair maps to jump-wings quotes and from there to a raw
//! [`Svi`] slice, so slice-level analytics (local volatility, density) come
//! for free. Surface-level static-arbitrage bounds follow Gatheral and
//! Jacquier (2014), Theorems 4.1 and 4.2.

use crate::core::ModelError;
use crate::vol::svi::{JumpWingsParams, Svi};

/// Power-law SSVI surface.
///
/// # Examples
/// ```rust
/// use openvol::vol::Ssvi;
///
/// let surface = Ssvi::new(-0.3, 0.8, 0.5).unwrap();
/// let slice = surface.svi_slice(0.04, 1.0).unwrap();
///
/// // The generated slice reproduces the surface ATM total variance.
/// assert!((slice.total_variance(0.0) - 0.04).abs() < 1e-12);
/// assert!(surface.butterfly_arbitrage_check(0.04));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Ssvi {
    rho: f64,
    nu: f64,
    gamma: f64,
}

impl Ssvi {
    /// Builds a power-law surface; requires `|rho| <= 1`, `nu >= 0` and
    /// `gamma` in `[0, 1]`, all finite.
    pub fn new(rho: f64, nu: f64, gamma: f64) -> Result<Self, ModelError> {
        if !(rho.is_finite() && nu.is_finite() && gamma.is_finite()) {
            return Err(ModelError::InvalidParameter(
                "ssvi parameters must be finite".to_string(),
            ));
        }
        if rho.abs() > 1.0 {
            return Err(ModelError::InvalidParameter(
                "ssvi rho must be in [-1, 1]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&gamma) {
            return Err(ModelError::InvalidParameter(
                "ssvi gamma must be in [0, 1]".to_string(),
            ));
        }
        if nu < 0.0 {
            return Err(ModelError::InvalidParameter(
                "ssvi nu must be >= 0".to_string(),
            ));
        }
        Ok(Self { rho, nu, gamma })
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn nu(&self) -> f64 {
        self.nu
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Power-law shape function `phi(theta) = nu theta^gamma`.
    pub fn phi(&self, atm_total_variance: f64) -> f64 {
        self.nu * atm_total_variance.powf(self.gamma)
    }

    /// Derivative of the shape function in theta:
    /// `phi'(theta) = (1 - gamma) phi(theta)`.
    pub fn phi_prime(&self, atm_total_variance: f64) -> f64 {
        (1.0 - self.gamma) * self.phi(atm_total_variance)
    }

    /// Surface total variance at log-moneyness `k` on the theta-slice.
    pub fn total_variance(&self, k: f64, atm_total_variance: f64) -> f64 {
        let phi = self.phi(atm_total_variance);
        let term = phi * k + self.rho;
        let root = (term * term + (1.0 - self.rho * self.rho)).sqrt();
        0.5 * atm_total_variance * (1.0 + self.rho * k * phi + root)
    }

    /// Surface implied variance at log-moneyness `k`.
    pub fn implied_variance(&self, k: f64, atm_total_variance: f64, t: f64) -> f64 {
        self.total_variance(k, atm_total_variance) / t
    }

    /// Surface implied volatility at log-moneyness `k`.
    pub fn implied_volatility(&self, k: f64, atm_total_variance: f64, t: f64) -> f64 {
        self.implied_variance(k, atm_total_variance, t).sqrt()
    }

    /// Implied-volatility skew `d sigma / d k` on the theta-slice.
    ///
    /// At the money this reduces to the Gatheral-Jacquier power-law skew
    /// `rho sqrt(theta) phi(theta) / (2 sqrt(t))`.
    pub fn volatility_skew(&self, k: f64, atm_total_variance: f64, t: f64) -> f64 {
        let phi = self.phi(atm_total_variance);
        let term = phi * k + self.rho;
        let root = (term * term + (1.0 - self.rho * self.rho)).sqrt();
        let dw_dk = 0.5 * atm_total_variance * phi * (self.rho + term / root);
        let w = self.total_variance(k, atm_total_variance);
        dw_dk / (2.0 * (w * t).sqrt())
    }

    /// Jump-wings quotes of the slice at (theta, t), per the power-law
    /// bridge `f = phi(theta) sqrt(theta)`.
    fn jump_wings(&self, atm_total_variance: f64, t: f64) -> JumpWingsParams {
        let f = self.phi(atm_total_variance) * atm_total_variance.sqrt();
        JumpWingsParams {
            vt: atm_total_variance / t,
            ut: 0.5 * self.rho * f,
            ct: 0.5 * (1.0 + self.rho) * f,
            pt: 0.5 * (1.0 - self.rho) * f,
            vmt: atm_total_variance * (1.0 - self.rho * self.rho) / t,
            t,
        }
    }

    /// The raw SVI slice generated at ATM total variance `theta` and year
    /// fraction `t`. Fails when (theta, t) leaves the jump-wings domain
    /// (non-positive theta or t, or a degenerate derived slice).
    pub fn svi_slice(&self, atm_total_variance: f64, t: f64) -> Result<Svi, ModelError> {
        Svi::from_jump_wings(self.jump_wings(atm_total_variance, t))
    }

    /// Risk-neutral density of the generated slice at log-moneyness `k`.
    pub fn risk_neutral_density(
        &self,
        k: f64,
        atm_total_variance: f64,
        t: f64,
    ) -> Result<f64, ModelError> {
        Ok(self.svi_slice(atm_total_variance, t)?.risk_neutral_density(k))
    }

    /// Dupire local volatility of the generated slice at log-moneyness `k`.
    pub fn local_volatility(
        &self,
        k: f64,
        atm_total_variance: f64,
        t: f64,
    ) -> Result<f64, ModelError> {
        Ok(self.svi_slice(atm_total_variance, t)?.local_volatility(k))
    }

    /// Surface no-butterfly-arbitrage bound (Gatheral-Jacquier Thm. 4.2):
    /// `theta phi (1 + |rho|) <= 4` and `theta phi^2 (1 + |rho|) <= 4`.
    pub fn butterfly_arbitrage_check(&self, atm_total_variance: f64) -> bool {
        let phi = self.phi(atm_total_variance);
        let cond1 = atm_total_variance * phi * (1.0 + self.rho.abs());
        let cond2 = cond1 * phi;
        cond1 <= 4.0 && cond2 <= 4.0
    }

    /// Surface no-calendar-spread-arbitrage bound (Gatheral-Jacquier
    /// Thm. 4.1): `0 <= phi'(theta) <= phi(theta) (1 + sqrt(1 - rho^2)) / rho^2`.
    pub fn calendar_spread_arbitrage_check(&self, atm_total_variance: f64) -> bool {
        let phi = self.phi(atm_total_variance);
        let slope = self.phi_prime(atm_total_variance);
        let bound = phi * (1.0 + (1.0 - self.rho * self.rho).sqrt()) / (self.rho * self.rho);
        slope >= 0.0 && slope <= bound
    }
}
