// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The functions fractal families are built from: complex functions
//! with known derivatives for Newton's method, and the two-argument
//! orbit functions used by the lambda and Pickover families.

use num::Complex;

/// A complex function together with its derivative.
pub trait SlopeFunction {
    /// f(z)
    fn value(&self, z: Complex<f64>) -> Complex<f64>;

    /// f'(z)
    fn slope(&self, z: Complex<f64>) -> Complex<f64>;
}

// Multiplied out rather than going through the complex logarithm, so
// roots stay exact.
fn ipow(z: Complex<f64>, n: u32) -> Complex<f64> {
    (0..n).fold(Complex::new(1.0, 0.0), |acc, _| acc * z)
}

/// z^n - 1, whose roots are the n-th roots of unity.
#[derive(Copy, Clone, Debug)]
pub struct RootsOfUnity(pub u32);

impl SlopeFunction for RootsOfUnity {
    fn value(&self, z: Complex<f64>) -> Complex<f64> {
        ipow(z, self.0) - 1.0
    }

    fn slope(&self, z: Complex<f64>) -> Complex<f64> {
        ipow(z, self.0.saturating_sub(1)) * f64::from(self.0)
    }
}

/// z^5 - z
#[derive(Copy, Clone, Debug)]
pub struct Quintic;

impl SlopeFunction for Quintic {
    fn value(&self, z: Complex<f64>) -> Complex<f64> {
        ipow(z, 5) - z
    }

    fn slope(&self, z: Complex<f64>) -> Complex<f64> {
        ipow(z, 4) * 5.0 - 1.0
    }
}

/// Any pair of plain functions, the first the derivative-free value
/// and the second its derivative.
#[derive(Copy, Clone)]
pub struct WithSlope<F, D>(pub F, pub D);

impl<F, D> SlopeFunction for WithSlope<F, D>
where
    F: Fn(Complex<f64>) -> Complex<f64>,
    D: Fn(Complex<f64>) -> Complex<f64>,
{
    fn value(&self, z: Complex<f64>) -> Complex<f64> {
        (self.0)(z)
    }

    fn slope(&self, z: Complex<f64>) -> Complex<f64> {
        (self.1)(z)
    }
}

/// The Newton functions that can be chosen by name.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NewtonFunction {
    /// z^3 - 1
    Cube,
    /// z^4 - 1
    Quartic,
    /// z^5 - z
    Quintic,
}

impl NewtonFunction {
    /// All of the names accepted by `from_name`.
    pub const NAMES: [&'static str; 3] = ["cube", "quartic", "quintic"];

    /// Look a function up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "cube" => Some(NewtonFunction::Cube),
            "quartic" => Some(NewtonFunction::Quartic),
            "quintic" => Some(NewtonFunction::Quintic),
            _ => None,
        }
    }
}

impl SlopeFunction for NewtonFunction {
    fn value(&self, z: Complex<f64>) -> Complex<f64> {
        match self {
            NewtonFunction::Cube => RootsOfUnity(3).value(z),
            NewtonFunction::Quartic => RootsOfUnity(4).value(z),
            NewtonFunction::Quintic => Quintic.value(z),
        }
    }

    fn slope(&self, z: Complex<f64>) -> Complex<f64> {
        match self {
            NewtonFunction::Cube => RootsOfUnity(3).slope(z),
            NewtonFunction::Quartic => RootsOfUnity(4).slope(z),
            NewtonFunction::Quintic => Quintic.slope(z),
        }
    }
}

/// A two-argument orbit update: given the current orbit value and the
/// sample point, produce the next orbit value.
pub type OrbitFn = fn(Complex<f64>, Complex<f64>) -> Complex<f64>;

fn cubic(z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
    z * z * z + c
}

fn sine(z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
    z.sin() + c
}

fn exponential(z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
    z.exp() + c
}

/// Names of the orbit functions `orbit_function` knows about.
pub const ORBIT_FUNCTIONS: [&str; 3] = ["cubic", "sine", "exp"];

/// Look an orbit function up by name.
pub fn orbit_function(name: &str) -> Option<OrbitFn> {
    match name {
        "cubic" => Some(cubic as OrbitFn),
        "sine" => Some(sine as OrbitFn),
        "exp" => Some(exponential as OrbitFn),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_slope<F: SlopeFunction>(function: &F, z: Complex<f64>) {
        let h = 1e-6;
        let numeric = (function.value(z + h) - function.value(z - h)) / (2.0 * h);
        let analytic = function.slope(z);
        assert!(
            (numeric - analytic).norm() < 1e-5 * analytic.norm().max(1.0),
            "slope mismatch at {:?}: {:?} vs {:?}",
            z,
            numeric,
            analytic
        );
    }

    #[test]
    fn named_slopes_match_finite_differences() {
        for name in NewtonFunction::NAMES.iter() {
            let function = NewtonFunction::from_name(name).unwrap();
            for z in &[Complex::new(0.3, -0.7), Complex::new(-1.1, 0.4), Complex::new(2.0, 2.0)] {
                check_slope(&function, *z);
            }
        }
    }

    #[test]
    fn cube_roots_of_unity_are_roots() {
        let third = 2.0 * std::f64::consts::PI / 3.0;
        for k in 0..3 {
            let root = Complex::from_polar(&1.0, &(third * f64::from(k)));
            assert!(RootsOfUnity(3).value(root).norm() < 1e-12);
        }
    }

    #[test]
    fn closures_can_carry_a_slope() {
        let f = WithSlope(|z: Complex<f64>| z * z, |z: Complex<f64>| z * 2.0);
        assert_eq!(f.value(Complex::new(3.0, 0.0)), Complex::new(9.0, 0.0));
        assert_eq!(f.slope(Complex::new(3.0, 0.0)), Complex::new(6.0, 0.0));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(NewtonFunction::from_name("sextic").is_none());
        assert!(orbit_function("tangent").is_none());
        for name in ORBIT_FUNCTIONS.iter() {
            assert!(orbit_function(name).is_some());
        }
    }

    #[test]
    fn cubic_orbit_adds_the_point() {
        let f = orbit_function("cubic").unwrap();
        assert_eq!(
            f(Complex::new(0.0, 1.0), Complex::new(1.0, 0.0)),
            Complex::new(1.0, -1.0)
        );
    }
}
