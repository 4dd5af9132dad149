// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Greyscale output: squeeze an image of escape values into a fixed
//! number of integral grey levels.

use crate::colourise::global_max;
use crate::pool::map_ordered;

/// Maps escape values onto `0..=levels`, relative to the image's
/// largest value.
#[derive(Copy, Clone, Debug)]
pub struct Normaliser {
    levels: u8,
    threads: usize,
}

impl Normaliser {
    /// Requires the number of grey levels and the number of threads to
    /// spread the work over.
    pub fn new(levels: u8, threads: usize) -> Self {
        Normaliser { levels, threads }
    }

    /// The level for a single value.
    pub fn level(&self, value: f64, max: f64) -> u8 {
        let scaled = (value * f64::from(self.levels)) / max;
        if scaled.is_nan() {
            0
        } else {
            scaled.max(0.0).min(f64::from(self.levels)) as u8
        }
    }

    /// Normalise a whole image.  An image of nothing but zeros is
    /// normalised against 1, and so comes out black.
    pub fn normalise(&self, image: &[Vec<f64>]) -> Vec<Vec<u8>> {
        let mut max = global_max(image, self.threads);
        if max == 0.0 {
            max = 1.0;
        }
        info!("Max found - {}", max);
        map_ordered(image, self.threads, |row| {
            row.iter().map(|value| self.level(*value, max)).collect()
        })
    }
}

impl Default for Normaliser {
    fn default() -> Self {
        Normaliser::new(255, 1)
    }
}
