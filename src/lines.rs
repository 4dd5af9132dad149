// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the LineSpec struct, which describes a straight line
//! segment on the complex plane and the evenly spaced sample points
//! along it, and the Remap transforms that may be applied to those
//! points before a fractal sees them.
use num::Complex;

use crate::errors::{invalid, FractalError};

/// A line on the complex plane, sampled at `steps` evenly spaced
/// points including both ends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineSpec {
    /// The first sample.
    pub start: Complex<f64>,
    /// The last sample.
    pub end: Complex<f64>,
    /// How many samples, never fewer than two.
    pub steps: usize,
}

/// A geometric transform applied to every point of a line once it has
/// been generated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Remap {
    /// Leave the points alone.
    Identity,
    /// Replace each point with one of reciprocal magnitude and the same
    /// argument, turning the exterior of the unit circle inside out.
    /// The origin has no image; it is left where it is.
    PolarInversion,
    /// Negate the imaginary component.
    Reflect,
}

impl LineSpec {
    /// Constructor.  Fails if fewer than two steps are requested, since
    /// a line needs both of its ends.
    pub fn new(start: Complex<f64>, end: Complex<f64>, steps: usize) -> Result<Self, FractalError> {
        if steps < 2 {
            return invalid(format!("A line needs at least 2 steps, got {}", steps));
        }
        Ok(LineSpec { start, end, steps })
    }

    // The distance between two neighbouring samples along one axis.
    // An axis that does not move gets exactly zero.
    fn delta(&self, from: f64, to: f64) -> f64 {
        if from == to {
            0.0
        } else {
            (to - from) / ((self.steps - 1) as f64)
        }
    }

    /// Produce the sample points, first to last.
    pub fn generate(&self) -> Vec<Complex<f64>> {
        let dre = self.delta(self.start.re, self.end.re);
        let dim = self.delta(self.start.im, self.end.im);
        (0..self.steps)
            .map(|i| {
                let i = i as f64;
                Complex::new(self.start.re + i * dre, self.start.im + i * dim)
            })
            .collect()
    }

    /// Produce the sample points and push them through a remap.
    pub fn generate_with(&self, remap: Remap) -> Vec<Complex<f64>> {
        let mut points = self.generate();
        remap.apply(&mut points);
        points
    }
}

impl Remap {
    /// Transform a single point.
    pub fn map(self, point: Complex<f64>) -> Complex<f64> {
        match self {
            Remap::Identity => point,
            Remap::PolarInversion => {
                let (r, theta) = point.to_polar();
                if r == 0.0 {
                    point
                } else {
                    Complex::from_polar(&(1.0 / r), &theta)
                }
            }
            Remap::Reflect => point.conj(),
        }
    }

    /// Transform a whole line of points in place.
    pub fn apply(self, points: &mut [Complex<f64>]) {
        if self == Remap::Identity {
            return;
        }
        for point in points.iter_mut() {
            *point = self.map(*point);
        }
    }
}
