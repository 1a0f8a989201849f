//! Single-maturity SVI variance slice in raw and jump-wings parametrizations.
//!
//! The jump-wings form (Gatheral and Jacquier 2014, §3) quotes a smile in
//! directly observable quantities: ATM implied variance, ATM skew, call/put
//! wing slopes, and the minimum implied variance. Construction translates
//! those into the raw form
//!
//! `w(k) = a + b (rho (k - m) + sqrt((k - m)^2 + sigma^2))`
//!
//! together with the time derivatives of (a, b, m, sigma) at fixed jump-wings
//! quotes, which feed the Dupire-style local variance
//! `sigma_loc^2 = (dw/dt) / g(k)` with Gatheral's density function g.
//!
//! All validation happens eagerly in the constructors; every query on a
//! constructed slice is total.

use crate::core::ModelError;
use crate::vol::ssvi::Ssvi;

/// Jump-wings quotes of one smile slice at year fraction `t`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JumpWingsParams {
    /// ATM implied variance, strictly positive.
    pub vt: f64,
    /// ATM implied-variance skew.
    pub ut: f64,
    /// Call (right) wing slope, non-negative.
    pub ct: f64,
    /// Put (left) wing slope, non-negative.
    pub pt: f64,
    /// Minimum implied variance, strictly positive.
    pub vmt: f64,
    /// Year fraction to expiry, strictly positive.
    pub t: f64,
}

/// Raw SVI coefficients of a total-variance slice.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawSviParams {
    pub a: f64,
    pub b: f64,
    pub rho: f64,
    pub m: f64,
    pub sigma: f64,
}

impl RawSviParams {
    /// Total implied variance at log-moneyness `k`.
    pub fn total_variance(&self, k: f64) -> f64 {
        let x = k - self.m;
        self.a + self.b * (self.rho * x + (x * x + self.sigma * self.sigma).sqrt())
    }

    /// First derivative of the total variance in log-moneyness.
    pub fn dw_dk(&self, k: f64) -> f64 {
        let x = k - self.m;
        self.b * (self.rho + x / (x * x + self.sigma * self.sigma).sqrt())
    }

    /// Second derivative of the total variance in log-moneyness.
    pub fn d2w_dk2(&self, k: f64) -> f64 {
        let x = k - self.m;
        let q = x * x + self.sigma * self.sigma;
        self.b * self.sigma * self.sigma / (q * q.sqrt())
    }

    /// Minimum of the total variance over all log-moneyness.
    pub fn min_total_variance(&self) -> f64 {
        self.a + self.b * self.sigma * (1.0 - self.rho * self.rho).sqrt()
    }
}

/// One SVI smile slice with its derived raw state and time derivatives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Svi {
    jw: JumpWingsParams,
    raw: RawSviParams,
    /// Translation auxiliaries of the jump-wings inversion.
    alpha: f64,
    beta: f64,
    /// Time derivatives of the raw coefficients at fixed jump-wings quotes.
    dadt: f64,
    dbdt: f64,
    dmdt: f64,
    dsdt: f64,
}

impl Svi {
    /// Builds a slice from jump-wings quotes.
    ///
    /// Derives, in order, b, rho, beta, alpha, m, a, sigma and the four time
    /// derivatives. Fails with [`ModelError::InvalidParameter`] when an input
    /// or a derived coefficient leaves the model's domain: `vt <= 0`,
    /// `vmt <= 0`, `t <= 0`, `b < 0`, `|rho| > 1`, `|beta| > 1`, derived
    /// `sigma <= 0`, or a negative minimum total variance.
    ///
    /// # Examples
    /// ```rust
    /// use openvol::vol::{JumpWingsParams, Svi};
    ///
    /// let slice = Svi::from_jump_wings(JumpWingsParams {
    ///     vt: 0.25,
    ///     ut: -0.12,
    ///     ct: 0.28,
    ///     pt: 0.52,
    ///     vmt: 0.2275,
    ///     t: 4.0,
    /// })
    /// .unwrap();
    ///
    /// assert!((slice.total_variance(0.0) - 1.0).abs() < 1e-12);
    /// assert!(slice.butterfly_arbitrage_check());
    /// ```
    pub fn from_jump_wings(jw: JumpWingsParams) -> Result<Self, ModelError> {
        if !(jw.vt > 0.0) {
            return Err(ModelError::InvalidParameter(
                "jump-wings vt must be > 0".to_string(),
            ));
        }
        if !(jw.vmt > 0.0) {
            return Err(ModelError::InvalidParameter(
                "jump-wings vmt must be > 0".to_string(),
            ));
        }
        if !(jw.t > 0.0) {
            return Err(ModelError::InvalidParameter(
                "jump-wings t must be > 0".to_string(),
            ));
        }

        let sqrt_w = (jw.vt * jw.t).sqrt();

        let b = sqrt_w * (jw.ct + jw.pt) / 2.0;
        if !(b >= 0.0) {
            return Err(ModelError::InvalidParameter(
                "derived svi b must be >= 0".to_string(),
            ));
        }

        let rho = if b == 0.0 {
            0.0
        } else {
            1.0 - jw.pt * sqrt_w / b
        };
        if !(rho.abs() <= 1.0) {
            return Err(ModelError::InvalidParameter(
                "derived svi rho must be in [-1, 1]".to_string(),
            ));
        }

        let beta = if b == 0.0 {
            1.0
        } else {
            rho - 2.0 * jw.ut * sqrt_w / b
        };
        if !(beta.abs() <= 1.0) {
            return Err(ModelError::InvalidParameter(
                "derived svi beta must be in [-1, 1]".to_string(),
            ));
        }

        let alpha = if beta < 0.0 {
            -(1.0 / (beta * beta) - 1.0).sqrt()
        } else if beta > 0.0 {
            (1.0 / (beta * beta) - 1.0).sqrt()
        } else {
            0.0
        };

        // Shared denominator of m and dm/dt; the sqrt(1 + alpha^2) term takes
        // alpha's sign.
        let rho_bar = (1.0 - rho * rho).sqrt();
        let factor = if alpha < 0.0 {
            -rho - (1.0 + alpha * alpha).sqrt() - alpha * rho_bar
        } else {
            -rho + (1.0 + alpha * alpha).sqrt() - alpha * rho_bar
        };

        let m = if b == 0.0 {
            0.0
        } else {
            jw.t * (jw.vt - jw.vmt) / (b * factor)
        };

        let a = if m == 0.0 {
            jw.t * (jw.vmt + jw.vt * rho_bar) / (1.0 + rho_bar)
        } else {
            jw.t * jw.vmt - b * (alpha * m) * rho_bar
        };

        let sigma = if m == 0.0 {
            if b == 0.0 { 1.0 } else { (jw.vt * jw.t - a) / b }
        } else {
            alpha * m
        };
        if !(sigma > 0.0) {
            return Err(ModelError::InvalidParameter(
                "derived svi sigma must be > 0".to_string(),
            ));
        }

        let raw = RawSviParams { a, b, rho, m, sigma };
        if !(raw.min_total_variance() >= 0.0) {
            return Err(ModelError::InvalidParameter(
                "derived svi minimum total variance must be >= 0".to_string(),
            ));
        }

        let dbdt = if b == 0.0 {
            0.0
        } else {
            jw.vt * (jw.ct + jw.pt) / (4.0 * sqrt_w)
        };

        let dmdt = if b == 0.0 {
            0.0
        } else {
            (jw.vt - jw.vmt) * (b - jw.t * dbdt) / (factor * b * b)
        };

        let dsdt = if m == 0.0 {
            if b == 0.0 {
                0.0
            } else {
                (b * (jw.vt - a / jw.t) - dbdt * (jw.vt * jw.t - a)) / (b * b)
            }
        } else {
            alpha * dmdt
        };

        let dadt = if m == 0.0 {
            a / jw.t
        } else {
            jw.vmt - rho_bar * (dbdt * sigma + dsdt * b)
        };

        Ok(Self {
            jw,
            raw,
            alpha,
            beta,
            dadt,
            dbdt,
            dmdt,
            dsdt,
        })
    }

    /// Builds a slice directly from raw coefficients at year fraction `t`.
    ///
    /// The jump-wings quotes are recovered through the forward map of
    /// Gatheral and Jacquier (2014, §3.1) so that wing-based checks and the
    /// power-law conversion stay available. Fails on `t <= 0`, `b < 0`,
    /// `|rho| > 1`, `sigma <= 0`, a non-positive ATM total variance, or a
    /// negative minimum total variance.
    pub fn from_raw(raw: RawSviParams, t: f64) -> Result<Self, ModelError> {
        if !(t > 0.0) {
            return Err(ModelError::InvalidParameter(
                "raw svi t must be > 0".to_string(),
            ));
        }
        if !(raw.b >= 0.0) {
            return Err(ModelError::InvalidParameter(
                "raw svi b must be >= 0".to_string(),
            ));
        }
        if !(raw.rho.abs() <= 1.0) {
            return Err(ModelError::InvalidParameter(
                "raw svi rho must be in [-1, 1]".to_string(),
            ));
        }
        if !(raw.sigma > 0.0) {
            return Err(ModelError::InvalidParameter(
                "raw svi sigma must be > 0".to_string(),
            ));
        }
        if !(raw.min_total_variance() >= 0.0) {
            return Err(ModelError::InvalidParameter(
                "raw svi minimum total variance must be >= 0".to_string(),
            ));
        }

        let w0 = raw.total_variance(0.0);
        if !(w0 > 0.0) {
            return Err(ModelError::InvalidParameter(
                "raw svi ATM total variance must be > 0".to_string(),
            ));
        }
        let sqrt_w = w0.sqrt();
        let reach = (raw.m * raw.m + raw.sigma * raw.sigma).sqrt();

        let jw = JumpWingsParams {
            vt: w0 / t,
            ut: raw.b / 2.0 * (raw.rho - raw.m / reach) / sqrt_w,
            ct: raw.b * (1.0 + raw.rho) / sqrt_w,
            pt: raw.b * (1.0 - raw.rho) / sqrt_w,
            vmt: raw.min_total_variance() / t,
            t,
        };

        let beta = if raw.b == 0.0 { 1.0 } else { raw.m / reach };
        let alpha = if raw.m == 0.0 { 0.0 } else { raw.sigma / raw.m };

        let rho_bar = (1.0 - raw.rho * raw.rho).sqrt();
        let factor = if alpha < 0.0 {
            -raw.rho - (1.0 + alpha * alpha).sqrt() - alpha * rho_bar
        } else {
            -raw.rho + (1.0 + alpha * alpha).sqrt() - alpha * rho_bar
        };

        let dbdt = if raw.b == 0.0 {
            0.0
        } else {
            jw.vt * (jw.ct + jw.pt) / (4.0 * (jw.vt * t).sqrt())
        };
        let dmdt = if raw.b == 0.0 {
            0.0
        } else {
            (jw.vt - jw.vmt) * (raw.b - t * dbdt) / (factor * raw.b * raw.b)
        };
        let dsdt = if raw.m == 0.0 {
            if raw.b == 0.0 {
                0.0
            } else {
                (raw.b * (jw.vt - raw.a / t) - dbdt * (jw.vt * t - raw.a)) / (raw.b * raw.b)
            }
        } else {
            alpha * dmdt
        };
        let dadt = if raw.m == 0.0 {
            raw.a / t
        } else {
            jw.vmt - rho_bar * (dbdt * raw.sigma + dsdt * raw.b)
        };

        Ok(Self {
            jw,
            raw,
            alpha,
            beta,
            dadt,
            dbdt,
            dmdt,
            dsdt,
        })
    }

    /// The jump-wings quotes of this slice.
    pub fn jump_wings(&self) -> JumpWingsParams {
        self.jw
    }

    /// The raw coefficients of this slice.
    pub fn raw(&self) -> RawSviParams {
        self.raw
    }

    /// Year fraction to expiry.
    pub fn t(&self) -> f64 {
        self.jw.t
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn da_dt(&self) -> f64 {
        self.dadt
    }

    pub fn db_dt(&self) -> f64 {
        self.dbdt
    }

    pub fn dm_dt(&self) -> f64 {
        self.dmdt
    }

    pub fn ds_dt(&self) -> f64 {
        self.dsdt
    }

    /// Total implied variance at log-moneyness `k`.
    pub fn total_variance(&self, k: f64) -> f64 {
        self.raw.total_variance(k)
    }

    /// Implied variance at log-moneyness `k`.
    pub fn implied_variance(&self, k: f64) -> f64 {
        self.total_variance(k) / self.jw.t
    }

    /// Implied volatility at log-moneyness `k`.
    pub fn implied_volatility(&self, k: f64) -> f64 {
        self.implied_variance(k).sqrt()
    }

    /// First derivative of the total variance in log-moneyness.
    pub fn dw_dk(&self, k: f64) -> f64 {
        self.raw.dw_dk(k)
    }

    /// Second derivative of the total variance in log-moneyness.
    pub fn d2w_dk2(&self, k: f64) -> f64 {
        self.raw.d2w_dk2(k)
    }

    /// Smile kernel `rho (k - m) + sqrt((k - m)^2 + sigma^2)`, so that the
    /// total variance reads `a + b * kernel`.
    fn smile_kernel(&self, k: f64) -> f64 {
        let x = k - self.raw.m;
        self.raw.rho * x + (x * x + self.raw.sigma * self.raw.sigma).sqrt()
    }

    /// Time derivative of the smile kernel at fixed jump-wings quotes.
    fn dkernel_dt(&self, k: f64) -> f64 {
        let x = k - self.raw.m;
        -self.raw.rho * self.dmdt
            + (self.dsdt * self.raw.sigma - self.dmdt * x)
                / (x * x + self.raw.sigma * self.raw.sigma).sqrt()
    }

    /// Time derivative of the total variance at fixed jump-wings quotes.
    pub fn dw_dt(&self, k: f64) -> f64 {
        self.dadt + self.raw.b * self.dkernel_dt(k) + self.dbdt * self.smile_kernel(k)
    }

    /// Gatheral's density function
    /// `g(k) = (1 - k w'/(2w))^2 - (w'^2/4)(1/4 + 1/w) + w''/2`.
    ///
    /// Strictly positive everywhere exactly when the slice is free of
    /// butterfly arbitrage.
    pub fn risk_neutral_density(&self, k: f64) -> f64 {
        let w = self.total_variance(k);
        let dw = self.dw_dk(k);
        let term1 = 1.0 - k * dw / (2.0 * w);
        let term2 = 0.25 * dw * dw * (0.25 + 1.0 / w);
        term1 * term1 - term2 + 0.5 * self.d2w_dk2(k)
    }

    /// Dupire local variance `(dw/dt) / g(k)`.
    ///
    /// Meaningful only on slices with a positive density; a butterfly
    /// violation makes the denominator non-positive.
    pub fn local_variance(&self, k: f64) -> f64 {
        self.dw_dt(k) / self.risk_neutral_density(k)
    }

    /// Dupire local volatility, the square root of the local variance.
    pub fn local_volatility(&self, k: f64) -> f64 {
        self.local_variance(k).sqrt()
    }

    /// Sufficient no-butterfly-arbitrage conditions on the wing slopes
    /// (Gatheral and Jacquier 2014, Cor. 5.2):
    /// `sqrt(vt t) max(ct, pt) < 2` and `(ct + pt) max(ct, pt) <= 2`.
    pub fn butterfly_arbitrage_check(&self) -> bool {
        let wing = self.jw.ct.max(self.jw.pt);
        let cond1 = (self.jw.vt * self.jw.t).sqrt() * wing;
        let cond2 = (self.jw.ct + self.jw.pt) * wing;
        cond1 < 2.0 && cond2 <= 2.0
    }

    /// Checks this slice against a longer-dated one for calendar-spread
    /// arbitrage: total variance must not decrease in maturity at any
    /// log-moneyness. Sampled on a wide log-moneyness grid; returns false
    /// when `later` does not expire after this slice or the smiles cross.
    pub fn calendar_spread_arbitrage_check(&self, later: &Svi) -> bool {
        if later.t() <= self.t() {
            return false;
        }
        const STEPS: usize = 400;
        let half_width = 2.0;
        (0..=STEPS).all(|i| {
            let k = -half_width + 2.0 * half_width * i as f64 / STEPS as f64;
            later.total_variance(k) >= self.total_variance(k)
        })
    }

    /// The power-law surface through this slice's wings: `rho = 1/(1 + pt/ut)`,
    /// `nu = 2 ut / rho`, `gamma = 1/2`. Fails when the wings do not admit a
    /// valid power-law parametrization.
    pub fn power_law_ssvi(&self) -> Result<Ssvi, ModelError> {
        let rho = 1.0 / (1.0 + self.jw.pt / self.jw.ut);
        Ssvi::new(rho, 2.0 * self.jw.ut / rho, 0.5)
    }
}
