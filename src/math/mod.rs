//! Standard-normal primitives shared by the pricing and volatility modules.
//!
//! The cumulative distribution uses the double-precision rational
//! approximation from West (2004), "Better approximations to cumulative
//! normal functions", the variant common in derivatives libraries, so values
//! line up with industry reference implementations.

pub mod distribution;

pub use distribution::{ContinuousDistribution, Normal};

const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Standard normal probability density at `x`.
pub fn normal_pdf(x: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution at `x`.
///
/// West (2004) rational approximation: a degree 6/7 rational polynomial below
/// the split point, a continued-fraction expansion for the far tail, and a
/// hard zero beyond |x| = 37 where the tail mass is below double precision.
pub fn normal_cdf(x: f64) -> f64 {
    const SPLIT: f64 = 7.07106781186547;

    const N0: f64 = 220.206867912376;
    const N1: f64 = 221.213596169931;
    const N2: f64 = 112.079291497871;
    const N3: f64 = 33.912866078383;
    const N4: f64 = 6.37396220353165;
    const N5: f64 = 0.700383064443688;
    const N6: f64 = 3.52624965998911e-02;
    const M0: f64 = 440.413735824752;
    const M1: f64 = 793.826512519948;
    const M2: f64 = 637.333633378831;
    const M3: f64 = 296.564248779674;
    const M4: f64 = 86.7807322029461;
    const M5: f64 = 16.064177579207;
    const M6: f64 = 1.75566716318264;
    const M7: f64 = 8.83883476483184e-02;

    let z = x.abs();
    let mut c = 0.0;

    if z <= 37.0 {
        let e = (-0.5 * z * z).exp();
        if z < SPLIT {
            let n = (((((N6 * z + N5) * z + N4) * z + N3) * z + N2) * z + N1) * z + N0;
            let d = ((((((M7 * z + M6) * z + M5) * z + M4) * z + M3) * z + M2) * z + M1) * z + M0;
            c = e * n / d;
        } else {
            let f = z + 1.0 / (z + 2.0 / (z + 3.0 / (z + 4.0 / (z + 13.0 / 20.0))));
            c = e / (SQRT_2PI * f);
        }
    }

    if x <= 0.0 { c } else { 1.0 - c }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pdf_peak_and_symmetry() {
        assert_relative_eq!(normal_pdf(0.0), INV_SQRT_2PI, epsilon = 1e-15);
        assert_relative_eq!(normal_pdf(1.3), normal_pdf(-1.3), epsilon = 1e-15);
    }

    #[test]
    fn cdf_reference_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_relative_eq!(normal_cdf(1.0), 0.841_344_746_068_542_9, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(-1.96), 0.024_997_895_148_220_43, epsilon = 1e-12);
        assert_relative_eq!(normal_cdf(6.0), 0.999_999_999_013_412_3, epsilon = 1e-14);
    }

    #[test]
    fn cdf_symmetry_and_tails() {
        for i in 0..200 {
            let x = -10.0 + i as f64 * 0.1;
            assert_relative_eq!(normal_cdf(-x), 1.0 - normal_cdf(x), epsilon = 1e-14);
        }
        assert_eq!(normal_cdf(-38.0), 0.0);
        assert_eq!(normal_cdf(38.0), 1.0);
    }

    #[test]
    fn cdf_continued_fraction_tail_is_monotone() {
        // Straddle the split point between the rational and tail branches.
        let mut prev = normal_cdf(6.9);
        for i in 0..20 {
            let x = 6.9 + i as f64 * 0.05;
            let c = normal_cdf(x);
            assert!(c >= prev);
            prev = c;
        }
    }
}
