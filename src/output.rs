// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes finished images out as PNG, either in colour or in grey.
//! Rows are written top to bottom, pixels left to right.

use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::colours::Colour;
use crate::errors::{invalid, FractalError};

/// A PNG sink of a fixed size.
pub struct PngWriter<W: Write> {
    output: W,
    width: usize,
    height: usize,
}

impl PngWriter<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write to it.
    pub fn create<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<Self, FractalError> {
        let output = BufWriter::new(File::create(path)?);
        Ok(PngWriter::new(output, width, height))
    }
}

impl<W: Write> PngWriter<W> {
    /// Wrap any writer.
    pub fn new(output: W, width: usize, height: usize) -> Self {
        PngWriter {
            output,
            width,
            height,
        }
    }

    fn check_shape<T>(&self, rows: &[Vec<T>]) -> Result<(), FractalError> {
        if rows.len() != self.height || rows.iter().any(|row| row.len() != self.width) {
            return invalid(format!(
                "Expected a {}x{} image, got {} rows",
                self.width,
                self.height,
                rows.len()
            ));
        }
        Ok(())
    }

    fn encode(self, pixels: &[u8], colour: ColorType) -> Result<(), FractalError> {
        let (width, height) = (self.width as u32, self.height as u32);
        let mut output = self.output;
        PNGEncoder::new(&mut output).encode(pixels, width, height, colour)?;
        output.flush()?;
        Ok(())
    }

    /// Write three 8-bit channels per pixel.
    pub fn write_colour(self, rows: &[Vec<Colour>]) -> Result<(), FractalError> {
        self.check_shape(rows)?;
        let mut pixels = Vec::with_capacity(self.width * self.height * 3);
        for colour in rows.iter().flatten() {
            pixels.extend_from_slice(&[colour.r, colour.g, colour.b]);
        }
        self.encode(&pixels, ColorType::RGB(8))
    }

    /// Write one 8-bit grey channel per pixel.
    pub fn write_grey(self, rows: &[Vec<u8>]) -> Result<(), FractalError> {
        self.check_shape(rows)?;
        let pixels: Vec<u8> = rows.iter().flatten().cloned().collect();
        self.encode(&pixels, ColorType::Gray(8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colours::{BLUE, GREEN, RED, WHITE};

    #[test]
    fn colour_rows_land_in_order() {
        let mut buffer = vec![];
        PngWriter::new(&mut buffer, 2, 2)
            .write_colour(&[vec![RED, GREEN], vec![BLUE, WHITE]])
            .unwrap();
        let decoded = image::load_from_memory(&buffer).unwrap().to_rgb();
        assert_eq!((decoded.width(), decoded.height()), (2, 2));
        assert_eq!(
            decoded.into_raw(),
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]
        );
    }

    #[test]
    fn grey_rows_land_in_order() {
        let mut buffer = vec![];
        PngWriter::new(&mut buffer, 3, 1)
            .write_grey(&[vec![0, 127, 255]])
            .unwrap();
        let decoded = image::load_from_memory(&buffer).unwrap().to_luma();
        assert_eq!(decoded.into_raw(), vec![0, 127, 255]);
    }

    #[test]
    fn wrong_shapes_are_rejected() {
        let mut buffer = vec![];
        assert!(PngWriter::new(&mut buffer, 2, 2)
            .write_grey(&[vec![0, 0], vec![0]])
            .is_err());
        assert!(PngWriter::new(&mut buffer, 2, 2)
            .write_colour(&[vec![RED, RED]])
            .is_err());
    }
}
