// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fractal families.  Each one is a handful of parameters and an
//! implementation of `Strategy`; none of them has a loop of its own.
//!
//! The escape-time families (Mandelbrot, Julia, Burning Ship,
//! Mandeldrop and the lambda variant) iterate until the orbit leaves a
//! disc of radius `escape` and report a smoothed escape count.  The
//! Pickover family traps the orbit in a square instead and reports
//! where it left.  The Newton families run Newton's method until it
//! settles, and report how long that took.

use num::{Complex, Zero};

use crate::errors::{invalid, FractalError};
use crate::functions::SlopeFunction;
use crate::lines::Remap;
use crate::orbit::{Orbit, Strategy};
use crate::smooth::{raise, smooth};

fn origin() -> Complex<f64> {
    Complex::new(0.0, 0.0)
}

fn check_escape(escape: f64) -> Result<f64, FractalError> {
    if escape > 0.0 && escape.is_finite() {
        Ok(escape)
    } else {
        invalid(format!("The escape radius must be positive, got {}", escape))
    }
}

// Both Mandelbrot-style families divide by the point itself when the
// exponent is negative.
fn negative_power_at_origin(power: Complex<f64>, point: Complex<f64>) -> Option<f64> {
    if power.re < 0.0 && point.is_zero() {
        Some(0.0)
    } else {
        None
    }
}

/// z -> z^power + c, starting from zero.
#[derive(Copy, Clone, Debug)]
pub struct Mandelbrot {
    power: Complex<f64>,
    escape: f64,
}

impl Mandelbrot {
    /// Requires the exponent and the escape radius.
    pub fn new(power: Complex<f64>, escape: f64) -> Result<Self, FractalError> {
        Ok(Mandelbrot {
            power,
            escape: check_escape(escape)?,
        })
    }
}

impl Strategy for Mandelbrot {
    fn init(&self, _point: Complex<f64>) -> Complex<f64> {
        origin()
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        orbit.magnitude() <= self.escape
    }

    fn step(&self, orbit: &mut Orbit, point: Complex<f64>) {
        let next = raise(orbit.value, self.power) + point;
        orbit.advance(next);
    }

    fn reduce(&self, orbit: &Orbit, _point: Complex<f64>, limit: usize) -> f64 {
        smooth(orbit.iterations, limit, orbit.magnitude(), self.power)
    }

    fn guard(&self, point: Complex<f64>) -> Option<f64> {
        negative_power_at_origin(self.power, point)
    }
}

/// z -> z^power + constant, starting from the point.
#[derive(Copy, Clone, Debug)]
pub struct Julia {
    power: Complex<f64>,
    escape: f64,
    constant: Complex<f64>,
}

impl Julia {
    /// Requires the exponent, the escape radius and the constant that
    /// picks out which Julia set to draw.
    pub fn new(power: Complex<f64>, escape: f64, constant: Complex<f64>) -> Result<Self, FractalError> {
        Ok(Julia {
            power,
            escape: check_escape(escape)?,
            constant,
        })
    }
}

impl Strategy for Julia {
    fn init(&self, point: Complex<f64>) -> Complex<f64> {
        point
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        orbit.magnitude() <= self.escape
    }

    fn step(&self, orbit: &mut Orbit, _point: Complex<f64>) {
        let next = raise(orbit.value, self.power) + self.constant;
        orbit.advance(next);
    }

    fn reduce(&self, orbit: &Orbit, _point: Complex<f64>, limit: usize) -> f64 {
        smooth(orbit.iterations, limit, orbit.magnitude(), self.power)
    }
}

/// z -> (|Re z| + i|Im z|)^power + c, starting from the point.  The
/// sample points are reflected so that the ship sails upright.
#[derive(Copy, Clone, Debug)]
pub struct BurningShip {
    power: Complex<f64>,
    escape: f64,
}

impl BurningShip {
    /// Requires the exponent and the escape radius.
    pub fn new(power: Complex<f64>, escape: f64) -> Result<Self, FractalError> {
        Ok(BurningShip {
            power,
            escape: check_escape(escape)?,
        })
    }
}

impl Strategy for BurningShip {
    fn init(&self, point: Complex<f64>) -> Complex<f64> {
        point
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        orbit.magnitude() <= self.escape
    }

    fn step(&self, orbit: &mut Orbit, point: Complex<f64>) {
        let folded = Complex::new(orbit.value.re.abs(), orbit.value.im.abs());
        orbit.advance(raise(folded, self.power) + point);
    }

    fn reduce(&self, orbit: &Orbit, _point: Complex<f64>, limit: usize) -> f64 {
        smooth(orbit.iterations, limit, orbit.magnitude(), self.power)
    }

    fn remap(&self) -> Remap {
        Remap::Reflect
    }
}

/// The Mandelbrot set seen through a polar inversion: what was outside
/// the unit circle is now inside it.  Always takes at least one step.
#[derive(Copy, Clone, Debug)]
pub struct Mandeldrop {
    inner: Mandelbrot,
}

impl Mandeldrop {
    /// Requires the exponent and the escape radius.
    pub fn new(power: Complex<f64>, escape: f64) -> Result<Self, FractalError> {
        Ok(Mandeldrop {
            inner: Mandelbrot::new(power, escape)?,
        })
    }
}

impl Strategy for Mandeldrop {
    fn init(&self, point: Complex<f64>) -> Complex<f64> {
        self.inner.init(point)
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        orbit.iterations == 0 || self.inner.proceed(orbit)
    }

    fn step(&self, orbit: &mut Orbit, point: Complex<f64>) {
        self.inner.step(orbit, point)
    }

    fn reduce(&self, orbit: &Orbit, point: Complex<f64>, limit: usize) -> f64 {
        self.inner.reduce(orbit, point, limit)
    }

    fn guard(&self, point: Complex<f64>) -> Option<f64> {
        self.inner.guard(point)
    }

    fn remap(&self) -> Remap {
        Remap::PolarInversion
    }
}

/// A Mandelbrot-style escape fractal whose step is any function of the
/// orbit and the point.  `power` is only used to smooth the result and
/// to decide whether the origin needs guarding.
#[derive(Copy, Clone, Debug)]
pub struct MandelLambda<F> {
    function: F,
    power: Complex<f64>,
    escape: f64,
}

impl<F> MandelLambda<F>
where
    F: Fn(Complex<f64>, Complex<f64>) -> Complex<f64>,
{
    /// Requires the step function, the exponent that governs its growth
    /// and the escape radius.
    pub fn new(function: F, power: Complex<f64>, escape: f64) -> Result<Self, FractalError> {
        Ok(MandelLambda {
            function,
            power,
            escape: check_escape(escape)?,
        })
    }
}

impl<F> Strategy for MandelLambda<F>
where
    F: Fn(Complex<f64>, Complex<f64>) -> Complex<f64>,
{
    fn init(&self, _point: Complex<f64>) -> Complex<f64> {
        origin()
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        orbit.magnitude() <= self.escape
    }

    fn step(&self, orbit: &mut Orbit, point: Complex<f64>) {
        let next = (self.function)(orbit.value, point);
        orbit.advance(next);
    }

    fn reduce(&self, orbit: &Orbit, _point: Complex<f64>, limit: usize) -> f64 {
        smooth(orbit.iterations, limit, orbit.magnitude(), self.power)
    }

    fn guard(&self, point: Complex<f64>) -> Option<f64> {
        negative_power_at_origin(self.power, point)
    }
}

/// Pickover's orbit trap: iterate while the orbit stays inside a square
/// of half-width `escape`, and report the taxicab distance from the
/// origin at which it left.
#[derive(Copy, Clone, Debug)]
pub struct Pickover<F> {
    function: F,
    escape: f64,
}

impl<F> Pickover<F>
where
    F: Fn(Complex<f64>, Complex<f64>) -> Complex<f64>,
{
    /// Requires the step function and the half-width of the trap.
    pub fn new(function: F, escape: f64) -> Result<Self, FractalError> {
        Ok(Pickover {
            function,
            escape: check_escape(escape)?,
        })
    }
}

impl<F> Strategy for Pickover<F>
where
    F: Fn(Complex<f64>, Complex<f64>) -> Complex<f64>,
{
    fn init(&self, point: Complex<f64>) -> Complex<f64> {
        point
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        orbit.value.re.abs() <= self.escape && orbit.value.im.abs() <= self.escape
    }

    fn step(&self, orbit: &mut Orbit, point: Complex<f64>) {
        let next = (self.function)(orbit.value, point);
        orbit.advance(next);
    }

    fn reduce(&self, orbit: &Orbit, _point: Complex<f64>, limit: usize) -> f64 {
        if orbit.iterations >= limit {
            0.0
        } else {
            orbit.value.re.abs() + orbit.value.im.abs()
        }
    }
}

/// Newton's method, z -> z - constant * f(z) / f'(z), starting from the
/// point and stopping once neither component moves by more than
/// `tolerance`.  Reports the number of steps it took.
#[derive(Copy, Clone, Debug)]
pub struct Newton<F> {
    function: F,
    constant: Complex<f64>,
    tolerance: f64,
}

impl<F: SlopeFunction> Newton<F> {
    /// Requires the function (with its derivative), the relaxation
    /// constant (1.0 for the plain method) and the tolerance.
    pub fn new(function: F, constant: Complex<f64>, tolerance: f64) -> Result<Self, FractalError> {
        if !(tolerance > 0.0) {
            return invalid(format!("The tolerance must be positive, got {}", tolerance));
        }
        Ok(Newton {
            function,
            constant,
            tolerance,
        })
    }
}

impl<F: SlopeFunction> Strategy for Newton<F> {
    fn init(&self, point: Complex<f64>) -> Complex<f64> {
        point
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        match orbit.previous {
            None => true,
            Some(previous) => {
                (orbit.value.re - previous.re).abs() > self.tolerance
                    || (orbit.value.im - previous.im).abs() > self.tolerance
            }
        }
    }

    // A flat derivative freezes the orbit: neither the value nor the
    // previous value moves, so the point runs on to the cap.
    fn step(&self, orbit: &mut Orbit, _point: Complex<f64>) {
        let slope = self.function.slope(orbit.value);
        if slope.is_zero() {
            return;
        }
        let next = orbit.value - self.constant * self.function.value(orbit.value) / slope;
        orbit.advance(next);
    }

    fn reduce(&self, orbit: &Orbit, _point: Complex<f64>, limit: usize) -> f64 {
        if orbit.iterations >= limit {
            0.0
        } else {
            orbit.iterations as f64
        }
    }
}

/// Newton's method again, but reduced with the escape-time smoothing
/// formula, which draws thin stalks along the basin boundaries.
#[derive(Copy, Clone, Debug)]
pub struct NewtonStalk<F> {
    newton: Newton<F>,
    power: Complex<f64>,
}

impl<F: SlopeFunction> NewtonStalk<F> {
    /// As `Newton::new`, plus the exponent used as the smoothing base.
    pub fn new(
        function: F,
        constant: Complex<f64>,
        tolerance: f64,
        power: Complex<f64>,
    ) -> Result<Self, FractalError> {
        Ok(NewtonStalk {
            newton: Newton::new(function, constant, tolerance)?,
            power,
        })
    }
}

impl<F: SlopeFunction> Strategy for NewtonStalk<F> {
    fn init(&self, point: Complex<f64>) -> Complex<f64> {
        self.newton.init(point)
    }

    fn proceed(&self, orbit: &Orbit) -> bool {
        self.newton.proceed(orbit)
    }

    fn step(&self, orbit: &mut Orbit, point: Complex<f64>) {
        self.newton.step(orbit, point)
    }

    fn reduce(&self, orbit: &Orbit, _point: Complex<f64>, limit: usize) -> f64 {
        smooth(orbit.iterations, limit, orbit.magnitude(), self.power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{orbit_function, NewtonFunction, RootsOfUnity, WithSlope};
    use crate::orbit::evaluate;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    fn two() -> Complex<f64> {
        c(2.0, 0.0)
    }

    #[test]
    fn escape_radius_must_be_positive() {
        assert!(Mandelbrot::new(two(), 0.0).is_err());
        assert!(Julia::new(two(), -4.0, c(0.0, 0.0)).is_err());
        assert!(BurningShip::new(two(), std::f64::NAN).is_err());
        assert!(Pickover::new(|z: Complex<f64>, _: Complex<f64>| z, 0.0).is_err());
        assert!(Mandeldrop::new(two(), 4.0).is_ok());
    }

    #[test]
    fn tolerance_must_be_positive() {
        assert!(Newton::new(RootsOfUnity(3), c(1.0, 0.0), 0.0).is_err());
        assert!(NewtonStalk::new(RootsOfUnity(3), c(1.0, 0.0), -1.0, two()).is_err());
    }

    #[test]
    fn origin_never_escapes_the_mandelbrot_set() {
        let mandelbrot = Mandelbrot::new(two(), 4.0).unwrap();
        for limit in &[1, 10, 256, 5000] {
            assert_eq!(evaluate(&mandelbrot, c(0.0, 0.0), *limit), 0.0);
        }
        assert_eq!(evaluate(&mandelbrot, c(-1.0, 0.0), 256), 0.0);
    }

    #[test]
    fn points_far_outside_escape_quickly() {
        let mandelbrot = Mandelbrot::new(two(), 4.0).unwrap();
        let value = evaluate(&mandelbrot, c(2.0, 2.0), 256);
        assert!(value > 0.0 && value < 5.0, "got {}", value);
    }

    #[test]
    fn negative_power_guards_the_origin() {
        let mandelbrot = Mandelbrot::new(c(-2.0, 0.0), 4.0).unwrap();
        assert_eq!(mandelbrot.guard(c(0.0, 0.0)), Some(0.0));
        assert_eq!(mandelbrot.guard(c(0.1, 0.0)), None);
        assert_eq!(evaluate(&mandelbrot, c(0.0, 0.0), 256), 0.0);
        assert!(evaluate(&mandelbrot, c(0.01, 0.01), 256).is_finite());

        let positive = Mandelbrot::new(two(), 4.0).unwrap();
        assert_eq!(positive.guard(c(0.0, 0.0)), None);

        let lambda = MandelLambda::new(|z: Complex<f64>, p: Complex<f64>| z * z + p, c(-1.0, 0.0), 4.0).unwrap();
        assert_eq!(lambda.guard(c(0.0, 0.0)), Some(0.0));
    }

    #[test]
    fn julia_starts_from_the_point() {
        let julia = Julia::new(two(), 4.0, c(-0.1948, 0.0)).unwrap();
        assert_eq!(julia.init(c(0.5, 0.5)), c(0.5, 0.5));
        // Already outside the escape radius: no steps, the sentinel.
        assert_eq!(evaluate(&julia, c(5.0, 0.0), 256), 0.0);
        // A fixed point of z^2 - 0.1948 never leaves.
        assert_eq!(evaluate(&julia, c(0.0, 0.0), 256), 0.0);
    }

    #[test]
    fn lambda_with_the_square_matches_mandelbrot() {
        let mandelbrot = Mandelbrot::new(two(), 4.0).unwrap();
        let lambda = MandelLambda::new(|z: Complex<f64>, p: Complex<f64>| z * z + p, two(), 4.0).unwrap();
        for point in &[c(0.3, 0.6), c(-1.5, 0.1), c(0.26, 0.0), c(1.0, 1.0)] {
            let a = evaluate(&mandelbrot, *point, 500);
            let b = evaluate(&lambda, *point, 500);
            assert!((a - b).abs() < 1e-9, "{:?}: {} vs {}", point, a, b);
        }
    }

    #[test]
    fn burning_ship_folds_and_reflects() {
        let ship = BurningShip::new(two(), 4.0).unwrap();
        assert_eq!(ship.remap(), Remap::Reflect);
        let mut orbit = Orbit::new(c(-1.0, -2.0));
        ship.step(&mut orbit, c(0.5, 0.0));
        // (1 + 2i)^2 + 0.5 = -3 + 4i + 0.5
        assert_eq!(orbit.value, c(-2.5, 4.0));
    }

    #[test]
    fn mandeldrop_always_takes_a_step() {
        let drop = Mandeldrop::new(two(), 0.5).unwrap();
        assert_eq!(drop.remap(), Remap::PolarInversion);
        let orbit = Orbit::new(c(10.0, 0.0));
        assert!(drop.proceed(&orbit));
        let mut stepped = orbit;
        stepped.iterations = 1;
        assert!(!drop.proceed(&stepped));
    }

    #[test]
    fn mandeldrop_escapes_after_one_step_from_outside() {
        let drop = Mandeldrop::new(two(), 4.0).unwrap();
        // One step lands on 10, so mu = 2 - log10(log10(10)) / log10(2) = 2.
        let value = evaluate(&drop, c(10.0, 0.0), 256);
        assert!((value - 2.0).abs() < 1e-12, "got {}", value);

        // A Julia orbit starting out there never steps and keeps the sentinel.
        let julia = Julia::new(two(), 4.0, c(-0.1948, 0.0)).unwrap();
        assert_eq!(evaluate(&julia, c(10.0, 0.0), 256), 0.0);
    }

    #[test]
    fn pickover_reports_the_exit_distance() {
        let trap = Pickover::new(orbit_function("cubic").unwrap(), 2.0).unwrap();
        // 1.5 -> 1.5^3 + 1.5 = 4.875, out of the square after one step.
        assert_eq!(evaluate(&trap, c(1.5, 0.0), 100), 4.875);
        assert_eq!(evaluate(&trap, c(0.0, 0.0), 100), 0.0);
    }

    #[test]
    fn pickover_traps_on_either_axis() {
        let trap = Pickover::new(|z: Complex<f64>, _: Complex<f64>| z, 1.0).unwrap();
        assert!(!trap.proceed(&Orbit::new(c(0.0, 1.5))));
        assert!(!trap.proceed(&Orbit::new(c(-1.5, 0.0))));
        assert!(trap.proceed(&Orbit::new(c(1.0, -1.0))));
    }

    #[test]
    fn newton_converges_on_a_cube_root_of_unity() {
        let newton = Newton::new(NewtonFunction::Cube, c(1.0, 0.0), 0.0001).unwrap();
        let limit = 256;
        let mut orbit = Orbit::new(newton.init(c(1.0, 0.1)));
        while orbit.iterations < limit && newton.proceed(&orbit) {
            newton.step(&mut orbit, c(1.0, 0.1));
            orbit.iterations += 1;
        }
        assert!(orbit.iterations < limit);
        assert!((orbit.value - c(1.0, 0.0)).norm() < 1e-3);

        let count = evaluate(&newton, c(1.0, 0.1), limit);
        assert!(count > 0.0 && count < limit as f64, "got {}", count);
        assert_eq!(count, orbit.iterations as f64);
    }

    #[test]
    fn newton_freezes_on_a_flat_derivative() {
        // f'(0) = 0 for z^3 - 1, so the origin never moves and runs to the cap.
        let newton = Newton::new(RootsOfUnity(3), c(1.0, 0.0), 0.0001).unwrap();
        let mut orbit = Orbit::new(c(0.0, 0.0));
        newton.step(&mut orbit, c(0.0, 0.0));
        assert_eq!(orbit, Orbit::new(c(0.0, 0.0)));
        assert_eq!(evaluate(&newton, c(0.0, 0.0), 64), 0.0);
    }

    #[test]
    fn newton_accepts_closures() {
        let sqrt_two = WithSlope(|z: Complex<f64>| z * z - 2.0, |z: Complex<f64>| z * 2.0);
        let newton = Newton::new(sqrt_two, c(1.0, 0.0), 1e-9).unwrap();
        let count = evaluate(&newton, c(1.0, 0.0), 100);
        assert!(count > 0.0 && count < 10.0);
    }

    #[test]
    fn newton_stalk_smooths_the_count() {
        let stalk = NewtonStalk::new(NewtonFunction::Quintic, c(1.0, 0.0), 0.0001, c(3.0, 0.0)).unwrap();
        let value = evaluate(&stalk, c(2.0, 1.0), 256);
        assert!(value.is_finite() && value > 0.0, "got {}", value);

        let frozen = NewtonStalk::new(NewtonFunction::Cube, c(1.0, 0.0), 0.0001, two()).unwrap();
        assert_eq!(evaluate(&frozen, c(0.0, 0.0), 256), 0.0);
    }

    #[test]
    fn julia_scene_terminates_everywhere() {
        let julia = Julia::new(two(), 4.0, c(-0.1948, 0.0)).unwrap();
        let rows = crate::lines::LineSpec::new(c(-2.0, 1.125), c(-2.0, -1.125), 9).unwrap();
        for start in rows.generate() {
            let line = crate::lines::LineSpec::new(start, c(2.0, start.im), 16).unwrap();
            for point in line.generate() {
                let value = evaluate(&julia, point, 256);
                assert!(value.is_finite() && value >= 0.0, "{:?} gave {}", point, value);
            }
        }
    }
}
