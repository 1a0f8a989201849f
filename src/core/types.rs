/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }
}

/// Settlement style of the underlying level quoted into the pricer.
///
/// A futures-style underlying carries no drift between trade date and expiry
/// (the quoted level already is the forward), while a spot underlying drifts
/// at the net carry rate `r - q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Underlying {
    /// Cash/spot underlying, grown at the net carry rate.
    Spot,
    /// Futures/forward underlying, already quoted at its forward level.
    Future,
}

impl Underlying {
    /// Returns 1.0 for a spot underlying and 0.0 for a future.
    ///
    /// Multiplies the net carry rate `r - q`, so a future gets zero drift.
    pub fn drift_flag(self) -> f64 {
        match self {
            Self::Spot => 1.0,
            Self::Future => 0.0,
        }
    }
}
