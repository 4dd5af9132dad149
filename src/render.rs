// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Scene struct, which lays a pixel grid over a rectangle
//! of the complex plane one row at a time and runs a fractal family
//! over each row.
//!
//! A vertical line down the left edge of the region gives the start of
//! each row; each row then runs right to the region's right edge.  Row
//! zero is the top of the image.

use num::Complex;

use crate::errors::{invalid, FractalError};
use crate::lines::LineSpec;
use crate::orbit::{evaluate_line, Strategy};
use crate::pool::map_ordered;

/// A region of the complex plane, the resolution it is sampled at, and
/// the iteration cap every point is held to.
#[derive(Clone, Debug)]
pub struct Scene {
    width: usize,
    height: usize,
    limit: usize,
    rows: Vec<LineSpec>,
}

impl Scene {
    /// Requires the width and height of the image, the left-upper and
    /// right-lower corners of the region of the complex plane it shows,
    /// and the iteration cap.
    pub fn new(
        width: usize,
        height: usize,
        leftupper: Complex<f64>,
        rightlower: Complex<f64>,
        limit: usize,
    ) -> Result<Self, FractalError> {
        if limit == 0 {
            return invalid("The iteration cap must be greater than zero");
        }
        let corners = [leftupper.re, leftupper.im, rightlower.re, rightlower.im];
        if corners.iter().any(|c| !c.is_finite()) {
            return invalid("The corners of the region must be finite");
        }
        if width < 2 || height < 2 {
            return invalid(format!(
                "The image must be at least 2x2 pixels, got {}x{}",
                width, height
            ));
        }

        let left_edge = LineSpec::new(leftupper, Complex::new(leftupper.re, rightlower.im), height)?;
        let rows = left_edge
            .generate()
            .into_iter()
            .map(|start| LineSpec::new(start, Complex::new(rightlower.re, start.im), width))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scene {
            width,
            height,
            limit,
            rows,
        })
    }

    /// The width of the image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of the image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The iteration cap.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The line each row of the image is sampled along, top to bottom.
    pub fn rows(&self) -> &[LineSpec] {
        &self.rows
    }

    /// Evaluate every point of the scene.  Rows are spread over
    /// `threads` threads and come back top to bottom.
    pub fn render<S>(&self, strategy: &S, threads: usize) -> Vec<Vec<f64>>
    where
        S: Strategy + Sync + ?Sized,
    {
        info!(
            "Rendering {}x{} at {} iterations on {} threads",
            self.width, self.height, self.limit, threads
        );
        let remap = strategy.remap();
        let limit = self.limit;
        let image = map_ordered(&self.rows, threads, |line| {
            evaluate_line(strategy, &line.generate_with(remap), limit)
        });
        info!("Drawing complete");
        image
    }
}
