//! Reduced three-parameter SVI for quick single-slice construction.

use crate::core::ModelError;
use crate::vol::ssvi::Ssvi;
use crate::vol::svi::Svi;

/// Convenience slice model in (ATM variance, nu, rho) at one maturity.
///
/// Wraps a power-law [`Ssvi`] with `gamma = 1/2` and derives its single slice
/// at `theta = vt * t`; all analytics and arbitrage checks delegate to the
/// wrapped models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReducedSvi {
    vt: f64,
    t: f64,
    ssvi: Ssvi,
    svi: Svi,
}

impl ReducedSvi {
    /// Builds the implied SSVI and its slice; fails with
    /// [`ModelError::InvalidParameter`] when `vt <= 0`, `t <= 0`, the SSVI
    /// parameters are out of domain, or the derived slice is degenerate.
    ///
    /// # Examples
    /// ```rust
    /// use openvol::vol::ReducedSvi;
    ///
    /// let model = ReducedSvi::new(0.04, 0.8, -0.3, 1.0).unwrap();
    /// let atm_vol = model.svi().implied_volatility(0.0);
    /// assert!((atm_vol - 0.2).abs() < 1e-12);
    /// ```
    pub fn new(vt: f64, nu: f64, rho: f64, t: f64) -> Result<Self, ModelError> {
        if !(vt > 0.0) {
            return Err(ModelError::InvalidParameter(
                "reduced svi vt must be > 0".to_string(),
            ));
        }
        if !(t > 0.0) {
            return Err(ModelError::InvalidParameter(
                "reduced svi t must be > 0".to_string(),
            ));
        }
        let ssvi = Ssvi::new(rho, nu, 0.5)?;
        let svi = ssvi.svi_slice(vt * t, t)?;
        Ok(Self { vt, t, ssvi, svi })
    }

    /// ATM total variance `vt * t` of the slice.
    pub fn atm_total_variance(&self) -> f64 {
        self.vt * self.t
    }

    /// The implied power-law surface.
    pub fn ssvi(&self) -> Ssvi {
        self.ssvi
    }

    /// The derived SVI slice.
    pub fn svi(&self) -> Svi {
        self.svi
    }

    /// Delegates to the surface butterfly bound at this slice's theta.
    pub fn butterfly_arbitrage_check(&self) -> bool {
        self.ssvi.butterfly_arbitrage_check(self.atm_total_variance())
    }

    /// Delegates to the surface calendar-spread bound at this slice's theta.
    pub fn calendar_spread_arbitrage_check(&self) -> bool {
        self.ssvi
            .calendar_spread_arbitrage_check(self.atm_total_variance())
    }
}
