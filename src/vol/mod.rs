//! Parametric implied-variance models: SVI slices, the power-law SSVI
//! surface, and the reduced three-parameter wrapper.
//!
//! References: Gatheral and Jacquier (2014), "Arbitrage-Free SVI Volatility
//! Surfaces"; Gatheral (2006) for the static-arbitrage constraints on total
//! variance.

pub mod reduced;
pub mod ssvi;
pub mod svi;

pub use reduced::ReducedSvi;
pub use ssvi::Ssvi;
pub use svi::{JumpWingsParams, RawSviParams, Svi};
