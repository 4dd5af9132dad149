// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by every fallible constructor in the crate.
//! Numeric singularities inside an orbit are never errors; they are
//! handled where they happen.

use failure::Fail;
use std::io;

/// Everything that can stop a render before (or after) the fractal
/// itself is computed.
#[derive(Debug, Fail)]
pub enum FractalError {
    /// A parameter was rejected before any work was dispatched.
    #[fail(display = "Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// The image sink could not be written.
    #[fail(display = "Could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for FractalError {
    fn from(err: io::Error) -> Self {
        FractalError::Io(err)
    }
}

/// Shorthand for building the configuration variant.
pub fn invalid<T, S: Into<String>>(message: S) -> Result<T, FractalError> {
    Err(FractalError::InvalidConfiguration(message.into()))
}
