//! Generalized Black-Scholes closed form for European vanilla options.
//!
//! One constructor validates the inputs and derives every shared intermediate
//! (drift, discount factor, forward, d1/d2, normal density and cumulative
//! values); each price/Greek accessor is then a pure read of that state.
//! Covers spot underlyings with a continuous carry rate (Black-Scholes-Merton)
//! and futures-style underlyings (Black-76) through the drift flag.
//!
//! References: Black and Scholes (1973), Black (1976), Hull (11th ed.) Ch. 19
//! for the sensitivity catalogue.

use crate::core::{Greeks, ModelError, OptionType, Underlying};
use crate::math::{ContinuousDistribution, Normal};

/// Raw market and contract inputs of the closed-form pricer.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlackScholesInputs {
    /// Spot or futures level of the underlying.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Continuously compounded interest rate.
    pub rate: f64,
    /// Continuous carry/dividend rate. Ignored for futures-style underlyings.
    pub carry: f64,
    /// Annualized implied volatility, strictly positive.
    pub vol: f64,
    /// Year fraction to expiry, strictly positive.
    pub expiry: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// Spot or futures settlement of the underlying.
    pub underlying: Underlying,
}

/// Black-Scholes closed-form pricer with cached derived state.
///
/// # Examples
/// ```rust
/// use openvol::core::{OptionType, Underlying};
/// use openvol::pricing::{BlackScholes, BlackScholesInputs};
///
/// let bs = BlackScholes::new(BlackScholesInputs {
///     spot: 100.0,
///     strike: 100.0,
///     rate: 0.01,
///     carry: 0.0,
///     vol: 0.20,
///     expiry: 1.0,
///     option_type: OptionType::Call,
///     underlying: Underlying::Spot,
/// })
/// .unwrap();
///
/// assert!((bs.price() - 8.433).abs() < 1e-3);
/// assert!(bs.gamma() > 0.0 && bs.vega() > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes {
    inputs: BlackScholesInputs,
    /// +1 call, -1 put.
    sign: f64,
    /// Drift of the underlying: zero for futures, `r - q` for spot.
    mu: f64,
    /// Discount factor `exp(-r T)`.
    df: f64,
    /// Growth factor `exp(mu T)`.
    growth: f64,
    /// Forward level `S exp(mu T)`.
    forward: f64,
    sqrt_t: f64,
    sig_sqrt_t: f64,
    d1: f64,
    d2: f64,
    /// Standard normal density at d1 / d2.
    nd1: f64,
    nd2: f64,
    /// Standard normal cumulative at sign*d1 / sign*d2.
    cnd1: f64,
    cnd2: f64,
}

impl BlackScholes {
    /// Validates the inputs and derives the full pricing state.
    ///
    /// Fails with [`ModelError::NonPositiveVolatility`] when `vol <= 0` and
    /// [`ModelError::NonPositiveYearFraction`] when `expiry <= 0`; otherwise
    /// every accessor on the returned value is well-defined.
    pub fn new(inputs: BlackScholesInputs) -> Result<Self, ModelError> {
        if inputs.vol <= 0.0 {
            return Err(ModelError::NonPositiveVolatility);
        }
        if inputs.expiry <= 0.0 {
            return Err(ModelError::NonPositiveYearFraction);
        }

        let stdnorm = Normal::standard();
        let sign = inputs.option_type.sign();
        let mu = inputs.underlying.drift_flag() * (inputs.rate - inputs.carry);
        let df = (-inputs.rate * inputs.expiry).exp();
        let growth = (mu * inputs.expiry).exp();
        let forward = inputs.spot * growth;
        let sqrt_t = inputs.expiry.sqrt();
        let sig_sqrt_t = inputs.vol * sqrt_t;
        let d1 =
            ((forward / inputs.strike).ln() + 0.5 * inputs.vol * inputs.vol * inputs.expiry)
                / sig_sqrt_t;
        let d2 = d1 - sig_sqrt_t;

        Ok(Self {
            inputs,
            sign,
            mu,
            df,
            growth,
            forward,
            sqrt_t,
            sig_sqrt_t,
            d1,
            d2,
            nd1: stdnorm.pdf(d1),
            nd2: stdnorm.pdf(d2),
            cnd1: stdnorm.cdf(sign * d1),
            cnd2: stdnorm.cdf(sign * d2),
        })
    }

    /// The validated construction inputs.
    pub fn inputs(&self) -> BlackScholesInputs {
        self.inputs
    }

    /// Forward level of the underlying at expiry.
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Discount factor to expiry.
    pub fn discount_factor(&self) -> f64 {
        self.df
    }

    pub fn d1(&self) -> f64 {
        self.d1
    }

    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// Present value of the option.
    pub fn price(&self) -> f64 {
        self.df * self.sign * (self.forward * self.cnd1 - self.inputs.strike * self.cnd2)
    }

    /// Sensitivity to the underlying level.
    pub fn delta(&self) -> f64 {
        self.df * self.sign * self.growth * self.cnd1
    }

    /// Second-order sensitivity to the underlying level.
    pub fn gamma(&self) -> f64 {
        self.df * self.growth * self.growth * self.nd1 / (self.forward * self.sig_sqrt_t)
    }

    /// Sensitivity to calendar time (time decay per year).
    pub fn theta(&self) -> f64 {
        let i = &self.inputs;
        let term1 = -self.forward * self.df * self.nd1 * i.vol / (2.0 * self.sqrt_t);
        let term2 = -self.sign * i.rate * i.strike * self.df * self.cnd2;
        let term3 = self.sign * (i.rate - self.mu) * self.forward * self.df * self.cnd1;
        term1 + term2 + term3
    }

    /// Sensitivity to the implied volatility.
    pub fn vega(&self) -> f64 {
        self.forward * self.df * self.nd1 * self.sqrt_t
    }

    /// Sensitivity to the interest rate.
    ///
    /// A futures-priced option reacts to the rate only through discounting;
    /// a spot-priced option also accrues the forward adjustment.
    pub fn rho(&self) -> f64 {
        let i = &self.inputs;
        match i.underlying {
            Underlying::Future => -i.expiry * self.df * self.price(),
            Underlying::Spot => self.sign * i.strike * i.expiry * self.cnd2 * self.df,
        }
    }

    /// Sensitivity to the carry/dividend rate. Zero for futures-style
    /// underlyings, whose drift ignores carry.
    pub fn epsilon(&self) -> f64 {
        let i = &self.inputs;
        match i.underlying {
            Underlying::Future => 0.0,
            Underlying::Spot => -self.sign * self.forward * i.expiry * self.cnd1 * self.df,
        }
    }

    /// Cross sensitivity of delta to volatility.
    pub fn vanna(&self) -> f64 {
        -self.df * self.growth * self.nd1 * self.d2 / self.inputs.vol
    }

    /// Second-order sensitivity to volatility (vomma).
    pub fn volga(&self) -> f64 {
        self.vega() * self.d1 * self.d2 / self.inputs.vol
    }

    /// Delta decay per year of calendar time.
    pub fn charm(&self) -> f64 {
        let i = &self.inputs;
        let term1 = (i.rate - self.mu) * self.df * self.growth * self.cnd1;
        let term2 = (2.0 * self.mu * i.expiry - i.vol * self.d2 * self.sqrt_t)
            / (2.0 * i.expiry * self.sig_sqrt_t);
        let term3 = self.df * self.growth * self.nd1;
        self.sign * term1 - term2 * term3
    }

    /// Change of vega as expiry lengthens.
    pub fn veta(&self) -> f64 {
        let i = &self.inputs;
        let term1 = -self.forward * self.df * self.nd1 * self.sqrt_t;
        let term2 = (i.rate - self.mu) + self.mu * self.d1 / self.sig_sqrt_t;
        let term3 = (1.0 + self.d1 * self.d2) / (2.0 * i.expiry);
        term1 * (term2 - term3)
    }

    /// Third-order sensitivity of the price to the underlying level.
    pub fn speed(&self) -> f64 {
        -self.growth * self.gamma() * (1.0 + self.d1 / self.sig_sqrt_t) / self.forward
    }

    /// Sensitivity of gamma to volatility.
    pub fn zomma(&self) -> f64 {
        self.gamma() * (self.d1 * self.d2 - 1.0) / self.inputs.vol
    }

    /// Gamma decay per year of calendar time.
    pub fn color(&self) -> f64 {
        let i = &self.inputs;
        let term1 =
            self.d1 * (2.0 * self.mu * i.expiry - self.d2 * self.sig_sqrt_t) / self.sig_sqrt_t;
        self.gamma() * (2.0 * (i.rate - self.mu) * i.expiry + 1.0 + term1) / (2.0 * i.expiry)
    }

    /// Third-order sensitivity to volatility.
    pub fn ultima(&self) -> f64 {
        let d1d2 = self.d1 * self.d2;
        -self.vega() * (d1d2 * (1.0 - d1d2) + self.d1 * self.d1 + self.d2 * self.d2)
            / (self.inputs.vol * self.inputs.vol)
    }

    /// Sensitivity to the strike.
    pub fn dual_delta(&self) -> f64 {
        -self.sign * self.df * self.cnd2
    }

    /// Second-order sensitivity to the strike (undiscounted density of the
    /// terminal distribution at the strike, discounted).
    pub fn dual_gamma(&self) -> f64 {
        self.df * self.nd2 / (self.inputs.strike * self.sig_sqrt_t)
    }

    /// First-order Greeks bundled into the standard container.
    pub fn greeks(&self) -> Greeks {
        Greeks {
            delta: self.delta(),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(),
            rho: self.rho(),
        }
    }
}
