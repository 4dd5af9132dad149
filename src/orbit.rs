// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one iteration loop every fractal family shares.
//!
//! Each family differs from the others only in where its orbit starts,
//! when its orbit stops, how one step of the orbit is taken, and how
//! the finished orbit is boiled down into a single number.  Those four
//! decisions are the hooks of the `Strategy` trait; `evaluate` is the
//! loop that drives them.

use num::Complex;

use crate::lines::Remap;

/// The running state of one point's orbit.  Created fresh for every
/// point and thrown away once that point has been reduced.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orbit {
    /// The current orbit value.
    pub value: Complex<f64>,
    /// The value before the last step, for families that test for
    /// convergence.  `None` until the first step has been taken.
    pub previous: Option<Complex<f64>>,
    /// How many steps the driver has taken.
    pub iterations: usize,
}

impl Orbit {
    /// An orbit sitting at its starting value.
    pub fn new(value: Complex<f64>) -> Self {
        Orbit {
            value,
            previous: None,
            iterations: 0,
        }
    }

    /// Move to a new value, remembering the old one.
    pub fn advance(&mut self, next: Complex<f64>) {
        self.previous = Some(self.value);
        self.value = next;
    }

    /// The size of the current orbit value.
    pub fn magnitude(&self) -> f64 {
        self.value.norm()
    }
}

/// The hooks a fractal family supplies to the shared driver.
pub trait Strategy {
    /// Where the orbit of `point` begins.
    fn init(&self, point: Complex<f64>) -> Complex<f64>;

    /// Whether the orbit should take another step.  The driver checks
    /// the iteration cap itself.
    fn proceed(&self, orbit: &Orbit) -> bool;

    /// Take one step.  Most families simply `advance` to the next value;
    /// a family that needs to hold its orbit still may leave it alone.
    fn step(&self, orbit: &mut Orbit, point: Complex<f64>);

    /// Boil the finished orbit down to one scalar.  `limit` is the cap
    /// the driver ran under, so that capped orbits can be recognised.
    fn reduce(&self, orbit: &Orbit, point: Complex<f64>, limit: usize) -> f64;

    /// A result to return without iterating at all, for points the
    /// family cannot evaluate.
    fn guard(&self, _point: Complex<f64>) -> Option<f64> {
        None
    }

    /// The transform the family wants applied to its sample points
    /// before they get here.
    fn remap(&self) -> Remap {
        Remap::Identity
    }
}

/// Run one point through a strategy, at most `limit` steps.
pub fn evaluate<S: Strategy + ?Sized>(strategy: &S, point: Complex<f64>, limit: usize) -> f64 {
    if let Some(value) = strategy.guard(point) {
        return value;
    }
    let mut orbit = Orbit::new(strategy.init(point));
    while orbit.iterations < limit && strategy.proceed(&orbit) {
        strategy.step(&mut orbit, point);
        orbit.iterations += 1;
    }
    strategy.reduce(&orbit, point, limit)
}

/// Run a whole line of points through a strategy, in order.
pub fn evaluate_line<S: Strategy + ?Sized>(
    strategy: &S,
    points: &[Complex<f64>],
    limit: usize,
) -> Vec<f64> {
    points
        .iter()
        .map(|point| evaluate(strategy, *point, limit))
        .collect()
}
