#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time and Newton fractal renderer
//!
//! An escape-time fractal takes a point on the complex plane, feeds it
//! into a formula, feeds the result back into the same formula, and
//! counts how many times it can do so before the result runs off
//! towards infinity.  That count, smoothed so that neighbouring pixels
//! don't fall into visible bands, is the pixel's value.  The Mandelbrot
//! set, its Julia sets, the Burning Ship and friends all work this way,
//! differing only in where the orbit starts and what formula it obeys.
//!
//! Newton fractals run Newton's root-finding method instead, and count
//! how long each point takes to settle on a root.
//!
//! The image is computed a row at a time: a `Scene` lays a line of
//! sample points across each row, a `Strategy` reduces every point to
//! a number, and once every row is done a `Colouriser` maps those
//! numbers through a palette relative to the largest of them.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod colourise;
pub mod colours;
pub mod errors;
pub mod families;
pub mod functions;
pub mod lines;
pub mod normalise;
pub mod orbit;
pub mod output;
pub mod pool;
pub mod render;
pub mod smooth;

pub use colourise::Colouriser;
pub use colours::{Colour, ColourRanger, Palette, Scaling};
pub use errors::FractalError;
pub use lines::{LineSpec, Remap};
pub use normalise::Normaliser;
pub use orbit::{evaluate, Orbit, Strategy};
pub use output::PngWriter;
pub use render::Scene;
