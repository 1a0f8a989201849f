//! OpenVol is a quantitative-finance analytics core for closed-form option
//! pricing and parametric implied-volatility surfaces.
//!
//! The crate combines the generalized Black-Scholes closed form (spot and
//! futures underlyings, with a full first/second/third-order Greeks suite)
//! with the SVI family of implied-variance models: raw and jump-wings slices,
//! the power-law SSVI surface, and a reduced three-parameter variant, each
//! with static no-arbitrage checks and Dupire-style local volatility.
//!
//! References used across modules:
//! - Black and Scholes (1973), "The Pricing of Options and Corporate
//!   Liabilities"; Black (1976) for the futures variant.
//! - Gatheral and Jacquier (2014), "Arbitrage-Free SVI Volatility Surfaces".
//! - West (2004), "Better approximations to cumulative normal functions".
//!
//! Design notes:
//! - Every model validates its parameters eagerly and returns
//!   [`core::ModelError`] from the constructor; a constructed value answers
//!   every query without further failure modes.
//! - Model objects are plain `Copy` values holding scalars derived once at
//!   construction, so they can be shared or sent across threads freely.
//! - Sampling on the normal distribution is the single non-deterministic
//!   operation; a seedable variant exists for reproducible runs.
//!
//! # Quick Start
//! Price a one-year ATM call and read its Greeks:
//! ```rust
//! use openvol::core::{OptionType, Underlying};
//! use openvol::pricing::{BlackScholes, BlackScholesInputs};
//!
//! let bs = BlackScholes::new(BlackScholesInputs {
//!     spot: 100.0,
//!     strike: 100.0,
//!     rate: 0.01,
//!     carry: 0.0,
//!     vol: 0.20,
//!     expiry: 1.0,
//!     option_type: OptionType::Call,
//!     underlying: Underlying::Spot,
//! })
//! .unwrap();
//!
//! assert!((bs.price() - 8.433).abs() < 1e-3);
//! let greeks = bs.greeks();
//! assert!(greeks.delta > 0.0 && greeks.gamma > 0.0);
//! ```
//!
//! Build an SVI slice from jump-wings quotes and query the smile:
//! ```rust
//! use openvol::vol::{JumpWingsParams, Svi};
//!
//! let slice = Svi::from_jump_wings(JumpWingsParams {
//!     vt: 0.04,
//!     ut: -0.006,
//!     ct: 0.014,
//!     pt: 0.026,
//!     vmt: 0.0364,
//!     t: 1.0,
//! })
//! .unwrap();
//!
//! assert!(slice.butterfly_arbitrage_check());
//! assert!(slice.implied_volatility(0.0) > 0.0);
//! ```
//!
//! Generate slices from a power-law SSVI surface:
//! ```rust
//! use openvol::vol::Ssvi;
//!
//! let surface = Ssvi::new(-0.3, 0.8, 0.5).unwrap();
//! let slice = surface.svi_slice(0.09, 2.0).unwrap();
//! assert!((slice.total_variance(0.0) - 0.09).abs() < 1e-12);
//! ```

pub mod core;
pub mod math;
pub mod pricing;
pub mod vol;
