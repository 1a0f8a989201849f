//! Closed-form pricing of European vanilla options.

pub mod black_scholes;

pub use black_scholes::{BlackScholes, BlackScholesInputs};
