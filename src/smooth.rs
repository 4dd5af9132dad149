// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Continuous iteration counts.  A raw escape count gives images with
//! visible bands between colours; folding in how far past the escape
//! radius the orbit landed smooths those bands away.

use num::{Complex, Zero};

/// Raise `z` to a (possibly complex) power.
///
/// Zero raised to anything is zero here, so every Mandelbrot-style
/// orbit that starts at the origin takes the point itself as its first
/// step whatever the exponent.  Small integral powers are multiplied out
/// directly, which is both faster and more exact than going through
/// the complex logarithm.
pub fn raise(z: Complex<f64>, power: Complex<f64>) -> Complex<f64> {
    if z.is_zero() {
        return z;
    }
    if power.im == 0.0 && power.re.fract() == 0.0 && power.re.abs() <= 16.0 {
        let n = power.re as i32;
        let mut acc = Complex::new(1.0, 0.0);
        for _ in 0..n.abs() {
            acc = acc * z;
        }
        return if n < 0 { acc.inv() } else { acc };
    }
    z.powc(power)
}

/// The normalised iteration count.  `iterations` is the count the
/// driver loop stopped at, `limit` its cap, `magnitude` the size of the
/// final orbit value and `power` the exponent that governed its growth.
///
/// Returns the 0.0 sentinel for points that never escaped.  A point
/// whose orbit starts outside the escape radius takes no step and so
/// shares that sentinel with the interior.
///
/// Inside the unit circle the inner logarithm is negative and the outer
/// one is taken in the complex plane, which keeps the count continuous
/// across `|z| = 1`.  The plain count is returned where the double
/// logarithm has no value at all: a magnitude of exactly 0 or 1, or a
/// non-finite result.
pub fn smooth(iterations: usize, limit: usize, magnitude: f64, power: Complex<f64>) -> f64 {
    if iterations == 0 || iterations >= limit {
        return 0.0;
    }
    let n = iterations as f64;
    if magnitude == 0.0 || magnitude == 1.0 {
        return n;
    }
    let ratio = Complex::new(magnitude.log10(), 0.0).ln() / power.ln();
    let mu = (Complex::new(n + 1.0, 0.0) - ratio).norm();
    if mu.is_finite() {
        mu
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn raise_zero_is_zero_for_any_power() {
        for power in &[c(2.0, 0.0), c(-2.0, 0.0), c(1.5, 0.0), c(2.0, 0.5)] {
            assert_eq!(raise(c(0.0, 0.0), *power), c(0.0, 0.0));
        }
    }

    #[test]
    fn raise_integral_powers_multiply_out() {
        assert_eq!(raise(c(0.0, 1.0), c(2.0, 0.0)), c(-1.0, 0.0));
        assert_eq!(raise(c(1.0, 1.0), c(3.0, 0.0)), c(-2.0, 2.0));
        assert_eq!(raise(c(2.0, 0.0), c(-2.0, 0.0)), c(0.25, 0.0));
        assert_eq!(raise(c(5.0, -3.0), c(0.0, 0.0)), c(1.0, 0.0));
    }

    #[test]
    fn raise_fractional_powers_agree_with_powc() {
        let z = c(0.3, -1.2);
        let p = c(1.5, 0.0);
        assert!((raise(z, p) - z.powc(p)).norm() < 1e-12);
        let z = raise(c(4.0, 0.0), c(0.5, 0.0));
        assert!((z - c(2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn smooth_keeps_the_sentinel() {
        assert_eq!(smooth(256, 256, 1000.0, c(2.0, 0.0)), 0.0);
        assert_eq!(smooth(0, 256, 1000.0, c(2.0, 0.0)), 0.0);
    }

    #[test]
    fn smooth_matches_the_log_log_formula() {
        // mu = (n + 1) - log10(log10(m)) / log10(p)
        let m: f64 = 100.0;
        let expected = 6.0 - m.log10().log10() / 2f64.log10();
        let got = smooth(5, 256, m, c(2.0, 0.0));
        assert!((got - expected).abs() < 1e-12, "{} != {}", got, expected);
    }

    #[test]
    fn smooth_is_non_negative() {
        // log10(log10(1e300)) / log10(2) is about 8.2, larger than n + 1.
        let got = smooth(2, 256, 1e300, c(2.0, 0.0));
        assert!(got > 0.0);
    }

    #[test]
    fn smooth_falls_back_to_plain_count() {
        assert_eq!(smooth(7, 256, 1.0, c(2.0, 0.0)), 7.0);
        assert_eq!(smooth(7, 256, 0.0, c(3.0, 0.0)), 7.0);
        assert_eq!(smooth(7, 256, 50.0, c(1.0, 0.0)), 7.0);
        assert_eq!(smooth(7, 256, std::f64::NAN, c(2.0, 0.0)), 7.0);
    }

    #[test]
    fn smooth_is_defined_inside_the_unit_circle() {
        // log10(0.5) is negative, so ln of it is ln(0.30103) + i*pi.
        let got = smooth(5, 256, 0.5, c(2.0, 0.0));
        assert!((got - 8.9625).abs() < 1e-3, "got {}", got);
    }

    #[test]
    fn smooth_is_continuous_across_the_unit_circle() {
        let power = c(2.0, 0.0);
        let below = smooth(5, 256, 1.0 - 1e-9, power);
        let above = smooth(5, 256, 1.0 + 1e-9, power);
        assert!(below > 30.0 && above > 30.0, "{} {}", below, above);
        assert!((below - above).abs() < 1.0, "{} != {}", below, above);
    }
}
