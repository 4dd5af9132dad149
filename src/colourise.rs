// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns a finished image of escape values into colours.  Every value
//! is coloured relative to the largest value in the whole image, so no
//! row can be coloured until every row has been looked at.

use itertools::Itertools;

use crate::colours::{Colour, ColourRanger, BLACK};
use crate::pool::map_ordered;

/// The largest value is stretched by this much so that it lands just
/// short of the palette's last stop.
pub const FUDGE_FACTOR: f64 = 1.001;

/// The largest finite value anywhere in the image, or 0.0 if there is
/// none.
pub fn global_max(image: &[Vec<f64>], threads: usize) -> f64 {
    map_ordered(image, threads, |row| {
        row.iter()
            .cloned()
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    })
    .into_iter()
    .fold1(f64::max)
    .unwrap_or(0.0)
}

/// Colours whole images through a ColourRanger.
#[derive(Clone, Debug)]
pub struct Colouriser {
    ranger: ColourRanger,
    threads: usize,
}

impl Colouriser {
    /// Requires the ranger to colour with and the number of threads to
    /// spread the work over.
    pub fn new(ranger: ColourRanger, threads: usize) -> Self {
        Colouriser { ranger, threads }
    }

    /// Colour every value of every row.  Rows come back in the order
    /// they went in, and so do the values within them.  An image with
    /// nothing in it but zeros is black.
    pub fn colourise(&self, image: &[Vec<f64>]) -> Vec<Vec<Colour>> {
        let max = global_max(image, self.threads) * FUDGE_FACTOR;
        info!("Total max - {}", max);
        if max == 0.0 {
            warn!("Every point is zero; the image will be black");
            return image.iter().map(|row| vec![BLACK; row.len()]).collect();
        }
        let ranger = &self.ranger;
        map_ordered(image, self.threads, |row| {
            row.iter().map(|value| ranger.colour(*value, max)).collect()
        })
    }
}
