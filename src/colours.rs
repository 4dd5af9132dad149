// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Palettes.  A palette is a list of colour stops; a ColourRanger
//! blends between neighbouring stops so that any proportion between
//! 0.0 and 1.0 names a colour.  A proportion of exactly 0.0 is always
//! black, whatever the stops say, because that is what a point that
//! never escaped looks like.

use crate::errors::{invalid, FractalError};

/// An 8-bit RGB colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Colour {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Colour {
    /// Constructor.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Colour { r, g, b }
    }
}

/// Red
pub const RED: Colour = Colour::new(255, 0, 0);
/// Green
pub const GREEN: Colour = Colour::new(0, 255, 0);
/// Blue
pub const BLUE: Colour = Colour::new(0, 0, 255);
/// Black
pub const BLACK: Colour = Colour::new(0, 0, 0);
/// White
pub const WHITE: Colour = Colour::new(255, 255, 255);
/// Magenta
pub const MAGENTA: Colour = Colour::new(255, 0, 255);
/// Yellow
pub const YELLOW: Colour = Colour::new(255, 255, 0);
/// Mid grey
pub const MID_GREY: Colour = Colour::new(127, 127, 127);
/// Dark purple
pub const DARK_PURPLE: Colour = Colour::new(35, 16, 81);
/// Mid teal
pub const MID_TEAL: Colour = Colour::new(66, 148, 155);
/// Orange
pub const ORANGE: Colour = Colour::new(255, 134, 5);
/// Lime green
pub const LIME_GREEN: Colour = Colour::new(200, 255, 5);
/// Sky blue
pub const SKY_BLUE: Colour = Colour::new(100, 233, 255);
/// Purple
pub const PURPLE: Colour = Colour::new(135, 32, 232);

const SIMPLE: [Colour; 3] = [RED, GREEN, BLUE];

const BLACK_PURPLE: [Colour; 8] = [
    BLACK, PURPLE, BLACK, PURPLE, BLACK, PURPLE, BLACK, PURPLE,
];

const MANY: [Colour; 12] = [
    PURPLE,
    GREEN,
    BLUE,
    GREEN,
    RED,
    YELLOW,
    MAGENTA,
    ORANGE,
    LIME_GREEN,
    WHITE,
    MID_TEAL,
    DARK_PURPLE,
];

const GREYS: [Colour; 3] = [BLACK, MID_GREY, WHITE];

const SKY: [Colour; 4] = [DARK_PURPLE, SKY_BLUE, WHITE, ORANGE];

/// The named stop lists.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Palette {
    /// Red to green to blue.
    Simple,
    /// Black and purple, alternating four times.
    BlackPurple,
    /// Twelve stops of everything.
    Many,
    /// Black to white.
    Greys,
    /// Dusk.
    Sky,
}

impl Palette {
    /// All of the names accepted by `from_name`.
    pub const NAMES: [&'static str; 5] = ["simple", "purple", "many", "greys", "sky"];

    /// Look a palette up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "simple" => Some(Palette::Simple),
            "purple" => Some(Palette::BlackPurple),
            "many" => Some(Palette::Many),
            "greys" => Some(Palette::Greys),
            "sky" => Some(Palette::Sky),
            _ => None,
        }
    }

    /// The palette's colour stops.
    pub fn stops(self) -> &'static [Colour] {
        match self {
            Palette::Simple => &SIMPLE,
            Palette::BlackPurple => &BLACK_PURPLE,
            Palette::Many => &MANY,
            Palette::Greys => &GREYS,
            Palette::Sky => &SKY,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Many
    }
}

/// How a value is turned into a proportion of the maximum before it is
/// looked up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scaling {
    /// value / max
    Linear,
    /// (value / max) ^ exponent
    Exponential(f64),
}

/// Blends a list of colour stops into a continuous palette.
#[derive(Clone, Debug)]
pub struct ColourRanger {
    stops: Vec<Colour>,
    scaling: Scaling,
}

impl ColourRanger {
    /// Constructor.  A palette needs at least two stops to have
    /// anything to blend between.
    pub fn new(stops: &[Colour], scaling: Scaling) -> Result<Self, FractalError> {
        if stops.len() < 2 {
            return invalid(format!(
                "A palette needs at least 2 colour stops, got {}",
                stops.len()
            ));
        }
        if let Scaling::Exponential(p) = scaling {
            if !p.is_finite() {
                return invalid(format!("The scaling exponent must be finite, got {}", p));
            }
        }
        Ok(ColourRanger {
            stops: stops.to_vec(),
            scaling,
        })
    }

    /// A ranger over one of the named palettes.
    pub fn from_palette(palette: Palette, scaling: Scaling) -> Result<Self, FractalError> {
        ColourRanger::new(palette.stops(), scaling)
    }

    /// The number of blends between stops.
    pub fn segments(&self) -> usize {
        self.stops.len() - 1
    }

    /// The colour at `proportion` of the way along the palette.  Zero is
    /// black.  Anything below zero or above one is pulled back to the
    /// nearest end, and a NaN counts as zero.
    pub fn interpolate(&self, proportion: f64) -> Colour {
        if proportion == 0.0 || proportion.is_nan() {
            return BLACK;
        }
        let proportion = proportion.max(0.0).min(1.0);
        let position = proportion * (self.segments() as f64);
        let segment = position.floor() as usize;
        if segment >= self.segments() {
            return self.stops[self.segments()];
        }
        let inner = position - (segment as f64);
        let (from, to) = (self.stops[segment], self.stops[segment + 1]);
        Colour {
            r: blend(from.r, to.r, inner),
            g: blend(from.g, to.g, inner),
            b: blend(from.b, to.b, inner),
        }
    }

    /// The colour for `value` given the largest value it will be
    /// compared against.
    pub fn colour(&self, value: f64, max: f64) -> Colour {
        if value == 0.0 {
            return BLACK;
        }
        let ratio = value / max;
        match self.scaling {
            Scaling::Linear => self.interpolate(ratio),
            Scaling::Exponential(p) => self.interpolate(ratio.powf(p)),
        }
    }
}

// Truncates toward zero, the way a colour channel always has.
fn blend(from: u8, to: u8, proportion: f64) -> u8 {
    let from = f64::from(from);
    let to = f64::from(to);
    (from + proportion * (to - from)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(palette: Palette) -> ColourRanger {
        ColourRanger::from_palette(palette, Scaling::Linear).unwrap()
    }

    #[test]
    fn ranger_needs_two_stops() {
        assert!(ColourRanger::new(&[], Scaling::Linear).is_err());
        assert!(ColourRanger::new(&[RED], Scaling::Linear).is_err());
        assert!(ColourRanger::new(&[RED, BLUE], Scaling::Linear).is_ok());
        assert!(ColourRanger::new(&[RED, BLUE], Scaling::Exponential(std::f64::INFINITY)).is_err());
    }

    #[test]
    fn zero_is_black_whatever_the_palette() {
        for name in Palette::NAMES.iter() {
            let ranger = linear(Palette::from_name(name).unwrap());
            assert_eq!(ranger.interpolate(0.0), BLACK);
            assert_eq!(ranger.colour(0.0, 10.0), BLACK);
        }
        let white = ColourRanger::new(&[WHITE, WHITE], Scaling::Exponential(0.5)).unwrap();
        assert_eq!(white.interpolate(0.0), BLACK);
        assert_eq!(white.colour(0.0, 1.0), BLACK);
    }

    #[test]
    fn interpolate_blends_within_a_segment() {
        let ranger = ColourRanger::new(&[BLACK, WHITE], Scaling::Linear).unwrap();
        assert_eq!(ranger.interpolate(0.5), Colour::new(127, 127, 127));
        let ranger = linear(Palette::Simple);
        // A quarter of the way along is half-way from red to green.
        assert_eq!(ranger.interpolate(0.25), Colour::new(127, 127, 0));
        assert_eq!(ranger.interpolate(0.5), GREEN);
    }

    #[test]
    fn interpolate_is_continuous_at_segment_joins() {
        let ranger = linear(Palette::Many);
        let segments = ranger.segments() as f64;
        for boundary in 1..ranger.segments() {
            let at = boundary as f64 / segments;
            let exact = ranger.interpolate(at);
            let below = ranger.interpolate(at - 1e-9);
            for (a, b) in &[(exact.r, below.r), (exact.g, below.g), (exact.b, below.b)] {
                assert!(
                    (i16::from(*a) - i16::from(*b)).abs() <= 1,
                    "jump at boundary {}: {:?} vs {:?}",
                    boundary,
                    exact,
                    below
                );
            }
        }
    }

    #[test]
    fn interpolate_clamps_the_top_end() {
        let ranger = linear(Palette::Simple);
        assert_eq!(ranger.interpolate(1.0), BLUE);
        assert_eq!(ranger.interpolate(1.5), BLUE);
        assert_eq!(ranger.interpolate(-0.5), RED);
        assert_eq!(ranger.interpolate(std::f64::NAN), BLACK);
    }

    #[test]
    fn colour_scales_before_blending() {
        let ranger = ColourRanger::new(&[BLACK, WHITE], Scaling::Linear).unwrap();
        assert_eq!(ranger.colour(5.0, 10.0), Colour::new(127, 127, 127));
        let ranger = ColourRanger::new(&[BLACK, WHITE], Scaling::Exponential(2.0)).unwrap();
        assert_eq!(ranger.colour(5.0, 10.0), Colour::new(63, 63, 63));
    }

    #[test]
    fn palettes_have_names() {
        for name in Palette::NAMES.iter() {
            let palette = Palette::from_name(name).unwrap();
            assert!(palette.stops().len() >= 2);
        }
        assert_eq!(Palette::from_name("plaid"), None);
        assert_eq!(Palette::default().stops().len(), 12);
    }
}
