//! Black-Scholes reference tests.
//!
//! Closed-form prices against textbook values, put-call parity on spot and
//! futures underlyings, and every Greek cross-checked against central finite
//! differences of the price (or of a lower-order Greek for the third-order
//! sensitivities).

use approx::assert_relative_eq;
use openvol::core::{OptionType, Underlying};
use openvol::pricing::{BlackScholes, BlackScholesInputs};

fn build(inputs: BlackScholesInputs) -> BlackScholes {
    BlackScholes::new(inputs).expect("inputs are valid")
}

fn base_case() -> BlackScholesInputs {
    BlackScholesInputs {
        spot: 100.0,
        strike: 105.0,
        rate: 0.03,
        carry: 0.015,
        vol: 0.22,
        expiry: 0.8,
        option_type: OptionType::Call,
        underlying: Underlying::Spot,
    }
}

#[test]
fn atm_call_reference_scenario() {
    let bs = build(BlackScholesInputs {
        spot: 100.0,
        strike: 100.0,
        rate: 0.01,
        carry: 0.0,
        vol: 0.20,
        expiry: 1.0,
        option_type: OptionType::Call,
        underlying: Underlying::Spot,
    });

    assert_relative_eq!(bs.price(), 8.4333, epsilon = 1e-3);
    assert_relative_eq!(bs.delta(), 0.5596, epsilon = 1e-4);
    assert_relative_eq!(bs.d1(), 0.15, epsilon = 1e-12);
    assert_relative_eq!(bs.d2(), -0.05, epsilon = 1e-12);
}

#[test]
fn put_call_parity_with_carry() {
    let call = build(base_case());
    let put = build(BlackScholesInputs {
        option_type: OptionType::Put,
        ..base_case()
    });
    let i = base_case();

    let rhs = i.spot * (-i.carry * i.expiry).exp() - i.strike * (-i.rate * i.expiry).exp();
    assert_relative_eq!(call.price() - put.price(), rhs, epsilon = 1e-10);
}

#[test]
fn black76_reference_and_parity() {
    let inputs = BlackScholesInputs {
        spot: 103.0,
        strike: 100.0,
        rate: 0.03,
        carry: 0.0,
        vol: 0.18,
        expiry: 1.0,
        option_type: OptionType::Call,
        underlying: Underlying::Future,
    };
    let call = build(inputs);
    let put = build(BlackScholesInputs {
        option_type: OptionType::Put,
        ..inputs
    });

    let df = (-0.03_f64).exp();
    assert_relative_eq!(call.price() - put.price(), df * 3.0, epsilon = 1e-10);
    // The futures drift is zero regardless of the carry input.
    let with_carry = build(BlackScholesInputs {
        carry: 0.10,
        ..inputs
    });
    assert_relative_eq!(call.price(), with_carry.price(), epsilon = 1e-14);
}

/// Bumps one input dimension and rebuilds the pricer.
fn bump(inputs: BlackScholesInputs, field: &str, h: f64) -> BlackScholes {
    let mut i = inputs;
    match field {
        "spot" => i.spot += h,
        "strike" => i.strike += h,
        "rate" => i.rate += h,
        "carry" => i.carry += h,
        "vol" => i.vol += h,
        "expiry" => i.expiry += h,
        _ => unreachable!("unknown bump field"),
    }
    build(i)
}

fn central<F: Fn(&BlackScholes) -> f64>(
    inputs: BlackScholesInputs,
    field: &str,
    h: f64,
    read: F,
) -> f64 {
    let up = bump(inputs, field, h);
    let dn = bump(inputs, field, -h);
    (read(&up) - read(&dn)) / (2.0 * h)
}

fn assert_greeks_match_finite_differences(inputs: BlackScholesInputs) {
    let bs = build(inputs);
    let h = 1e-5;

    let delta_fd = central(inputs, "spot", h, |b| b.price());
    assert_relative_eq!(bs.delta(), delta_fd, epsilon = 1e-7, max_relative = 1e-6);

    let gamma_fd = central(inputs, "spot", h, |b| b.delta());
    assert_relative_eq!(bs.gamma(), gamma_fd, epsilon = 1e-7, max_relative = 1e-6);

    let vega_fd = central(inputs, "vol", h, |b| b.price());
    assert_relative_eq!(bs.vega(), vega_fd, epsilon = 1e-6, max_relative = 1e-6);

    // Theta is quoted against calendar time, the negative of the expiry
    // derivative.
    let theta_fd = -central(inputs, "expiry", h, |b| b.price());
    assert_relative_eq!(bs.theta(), theta_fd, epsilon = 1e-6, max_relative = 1e-6);

    if inputs.underlying == Underlying::Spot {
        let rho_fd = central(inputs, "rate", h, |b| b.price());
        assert_relative_eq!(bs.rho(), rho_fd, epsilon = 1e-6, max_relative = 1e-6);

        let epsilon_fd = central(inputs, "carry", h, |b| b.price());
        assert_relative_eq!(
            bs.epsilon(),
            epsilon_fd,
            epsilon = 1e-6,
            max_relative = 1e-6
        );
    }

    let vanna_fd = central(inputs, "vol", h, |b| b.delta());
    assert_relative_eq!(bs.vanna(), vanna_fd, epsilon = 1e-6, max_relative = 1e-6);

    let volga_fd = central(inputs, "vol", h, |b| b.vega());
    assert_relative_eq!(bs.volga(), volga_fd, epsilon = 1e-5, max_relative = 1e-5);

    let charm_fd = -central(inputs, "expiry", h, |b| b.delta());
    assert_relative_eq!(bs.charm(), charm_fd, epsilon = 1e-6, max_relative = 1e-5);

    let veta_fd = central(inputs, "expiry", h, |b| b.vega());
    assert_relative_eq!(bs.veta(), veta_fd, epsilon = 1e-5, max_relative = 1e-5);

    let speed_fd = central(inputs, "spot", h, |b| b.gamma());
    assert_relative_eq!(bs.speed(), speed_fd, epsilon = 1e-7, max_relative = 1e-5);

    let zomma_fd = central(inputs, "vol", h, |b| b.gamma());
    assert_relative_eq!(bs.zomma(), zomma_fd, epsilon = 1e-6, max_relative = 1e-5);

    let color_fd = -central(inputs, "expiry", h, |b| b.gamma());
    assert_relative_eq!(bs.color(), color_fd, epsilon = 1e-6, max_relative = 1e-5);

    let ultima_fd = central(inputs, "vol", h, |b| b.volga());
    assert_relative_eq!(bs.ultima(), ultima_fd, epsilon = 1e-4, max_relative = 1e-4);

    let dual_delta_fd = central(inputs, "strike", h, |b| b.price());
    assert_relative_eq!(
        bs.dual_delta(),
        dual_delta_fd,
        epsilon = 1e-7,
        max_relative = 1e-6
    );

    let dual_gamma_fd = central(inputs, "strike", h, |b| b.dual_delta());
    assert_relative_eq!(
        bs.dual_gamma(),
        dual_gamma_fd,
        epsilon = 1e-7,
        max_relative = 1e-6
    );
}

#[test]
fn spot_call_greeks_match_finite_differences() {
    assert_greeks_match_finite_differences(base_case());
}

#[test]
fn spot_put_greeks_match_finite_differences() {
    assert_greeks_match_finite_differences(BlackScholesInputs {
        option_type: OptionType::Put,
        strike: 92.0,
        ..base_case()
    });
}

#[test]
fn future_option_greeks_match_finite_differences() {
    assert_greeks_match_finite_differences(BlackScholesInputs {
        underlying: Underlying::Future,
        carry: 0.0,
        ..base_case()
    });
}

#[test]
fn future_rho_is_discounted_price_decay() {
    let inputs = BlackScholesInputs {
        underlying: Underlying::Future,
        ..base_case()
    };
    let bs = build(inputs);
    let df = (-inputs.rate * inputs.expiry).exp();
    assert_relative_eq!(
        bs.rho(),
        -inputs.expiry * df * bs.price(),
        epsilon = 1e-12
    );
    assert_eq!(bs.epsilon(), 0.0);
}

#[test]
fn deep_wings_stay_finite_and_ordered() {
    for &strike in &[40.0, 60.0, 100.0, 160.0, 260.0] {
        let call = build(BlackScholesInputs {
            strike,
            ..base_case()
        });
        let put = build(BlackScholesInputs {
            strike,
            option_type: OptionType::Put,
            ..base_case()
        });

        assert!(call.price() >= 0.0 && call.price() <= call.inputs().spot);
        assert!(put.price() >= 0.0);
        assert!(call.gamma() > 0.0);
        // Call and put deltas differ by the carry discount factor exactly.
        let i = call.inputs();
        assert_relative_eq!(
            call.delta() - put.delta(),
            (-i.carry * i.expiry).exp(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn greeks_container_mirrors_accessors() {
    let bs = build(base_case());
    let g = bs.greeks();
    assert_relative_eq!(g.delta, bs.delta(), epsilon = 1e-15);
    assert_relative_eq!(g.gamma, bs.gamma(), epsilon = 1e-15);
    assert_relative_eq!(g.vega, bs.vega(), epsilon = 1e-15);
    assert_relative_eq!(g.theta, bs.theta(), epsilon = 1e-15);
    assert_relative_eq!(g.rho, bs.rho(), epsilon = 1e-15);
}

#[test]
fn serde_round_trip_rebuilds_identical_pricer() {
    let inputs = base_case();
    let json = serde_json::to_string(&inputs).expect("inputs serialize");
    let decoded: BlackScholesInputs = serde_json::from_str(&json).expect("inputs deserialize");
    assert_eq!(decoded, inputs);

    let a = build(inputs);
    let b = build(decoded);
    assert_relative_eq!(a.price(), b.price(), epsilon = 1e-15);
    assert_relative_eq!(a.theta(), b.theta(), epsilon = 1e-15);
}
