/*
bitmap.rs

Copyright 2025 Hervé Quatremain

This file is part of Rikudo.

Rikudo is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Rikudo is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Rikudo. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Black and white pixel rasters used as an input to build the graph.

use log::debug;
use std::path::Path;

use crate::errors::{Result, RikudoError};

const BLACK: u32 = 0xFF00_0000;
const WHITE: u32 = 0xFFFF_FFFF;

/// Read access to a raster. The origin is the top-left corner.
pub trait Bitmap {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Whether the pixel at the given position is pure black.
    ///
    /// # Errors
    ///
    /// Positions outside the raster are rejected.
    fn is_black(&self, x: usize, y: usize) -> Result<bool>;
}

/// Raster of ARGB pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryImage {
    width: usize,
    height: usize,
    raster: Vec<u32>,
}

impl BinaryImage {
    /// Create a [`BinaryImage`] object. All the pixels are black.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            raster: vec![BLACK; width * height],
        }
    }

    /// Create a square [`BinaryImage`] object.
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Load an image file. Colors are kept as is; only pure black pixels count as black.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();
        debug!("Loaded {path:?}: {width}x{height}");
        let raster: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
            })
            .collect();
        Ok(Self {
            width: width as usize,
            height: height as usize,
            raster,
        })
    }

    /// Return the side length of a square image, or None otherwise.
    pub fn size(&self) -> Option<usize> {
        if self.width == self.height {
            Some(self.width)
        } else {
            None
        }
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(RikudoError::invalid(format!(
                "pixel ({x}, {y}) is outside the {}x{} image",
                self.width, self.height
            )));
        }
        Ok(x + self.width * y)
    }

    /// Set the ARGB color of a pixel.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) -> Result<()> {
        let i: usize = self.index(x, y)?;
        self.raster[i] = color;
        Ok(())
    }

    pub fn to_black(&mut self, x: usize, y: usize) -> Result<()> {
        self.set_pixel(x, y, BLACK)
    }

    pub fn to_white(&mut self, x: usize, y: usize) -> Result<()> {
        self.set_pixel(x, y, WHITE)
    }

    /// Fill the square area with top-left corner `(x, y)` in black.
    pub fn fill_area_black(&mut self, x: usize, y: usize, size: usize) -> Result<()> {
        self.fill_area(x, y, size, BLACK)
    }

    /// Fill the square area with top-left corner `(x, y)` in white.
    pub fn fill_area_white(&mut self, x: usize, y: usize, size: usize) -> Result<()> {
        self.fill_area(x, y, size, WHITE)
    }

    fn fill_area(&mut self, x: usize, y: usize, size: usize, color: u32) -> Result<()> {
        for i in 0..size {
            for j in 0..size {
                self.set_pixel(x + i, y + j, color)?;
            }
        }
        Ok(())
    }

    /// Whether all the pixels of the square area have the same color.
    pub fn is_constant_color(&self, x: usize, y: usize, size: usize) -> Result<bool> {
        if x + size > self.width || y + size > self.height {
            return Err(RikudoError::invalid(format!(
                "area ({x}, {y}) of size {size} is outside the {}x{} image",
                self.width, self.height
            )));
        }
        let reference: u32 = self.raster[self.index(x, y)?];
        for i in 0..size {
            for j in 0..size {
                if self.raster[self.index(x + i, y + j)?] != reference {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

impl Bitmap for BinaryImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn is_black(&self, x: usize, y: usize) -> Result<bool> {
        let i: usize = self.index(x, y)?;
        Ok(self.raster[i] & 0x00FF_FFFF == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_is_black() {
        let img: BinaryImage = BinaryImage::new(4, 3);
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.size(), None);
        assert!(img.is_black(3, 2).unwrap());
        assert!(img.is_constant_color(0, 0, 3).unwrap());
    }

    #[test]
    fn fill_and_query() {
        let mut img: BinaryImage = BinaryImage::square(8);
        img.fill_area_white(4, 0, 4).unwrap();
        assert_eq!(img.size(), Some(8));
        assert!(!img.is_black(5, 1).unwrap());
        assert!(img.is_black(3, 1).unwrap());
        assert!(!img.is_constant_color(2, 0, 4).unwrap());
        assert!(img.is_constant_color(4, 0, 4).unwrap());
        img.to_black(5, 1).unwrap();
        assert!(img.is_black(5, 1).unwrap());
    }

    #[test]
    fn alpha_is_ignored() {
        let mut img: BinaryImage = BinaryImage::square(2);
        img.set_pixel(0, 0, 0x0000_0000).unwrap();
        img.set_pixel(1, 0, 0xFF00_0001).unwrap();
        assert!(img.is_black(0, 0).unwrap());
        assert!(!img.is_black(1, 0).unwrap());
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut img: BinaryImage = BinaryImage::new(4, 3);
        assert!(matches!(
            img.is_black(4, 0),
            Err(RikudoError::InvalidArgument { .. })
        ));
        assert!(img.to_white(0, 3).is_err());
        assert!(img.fill_area_black(2, 2, 2).is_err());
        assert!(img.is_constant_color(2, 0, 3).is_err());
    }
}
