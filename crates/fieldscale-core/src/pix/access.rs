//! Pixel access functions
//!
//! Low-level functions for getting and setting individual samples.
//!
//! # Sample packing
//!
//! Samples are packed MSB-to-LSB within each 32-bit word. In an 8-bit
//! image, pixel 0 occupies bits 31..24 of the first word; in a 16-bit
//! image it occupies bits 31..16.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Get a sample value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a sample value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; an `x` past the row end reads padding.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_sample(self.row_data(y), x, self.depth())
    }
}

impl PixMut {
    /// Get a sample value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a sample value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_sample(self.row_data(y), x, self.depth())
    }

    /// Set a sample value at (x, y).
    ///
    /// Values wider than the depth are masked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width() as usize) + (x as usize),
                len: (self.width() as usize) * (self.height() as usize),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a sample value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        write_sample(self.row_data_mut(y), x, depth, val);
    }
}

#[inline]
fn read_sample(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit8 => get_data_byte(line, x),
        PixelDepth::Bit16 => get_data_two_bytes(line, x),
        PixelDepth::Bit32 => get_data_four_bytes(line, x),
    }
}

#[inline]
fn write_sample(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit8 => set_data_byte(line, x, val),
        PixelDepth::Bit16 => set_data_two_bytes(line, x, val),
        PixelDepth::Bit32 => set_data_four_bytes(line, x, val),
    }
}

/// Get an 8-bit sample.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    let word = line[(x >> 2) as usize];
    (word >> (24 - 8 * (x & 3))) & 0xff
}

/// Set an 8-bit sample.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let idx = (x >> 2) as usize;
    let shift = 24 - 8 * (x & 3);
    line[idx] = (line[idx] & !(0xff << shift)) | ((val & 0xff) << shift);
}

/// Get a 16-bit sample.
#[inline]
pub fn get_data_two_bytes(line: &[u32], x: u32) -> u32 {
    let word = line[(x >> 1) as usize];
    (word >> (16 - 16 * (x & 1))) & 0xffff
}

/// Set a 16-bit sample.
#[inline]
pub fn set_data_two_bytes(line: &mut [u32], x: u32, val: u32) {
    let idx = (x >> 1) as usize;
    let shift = 16 - 16 * (x & 1);
    line[idx] = (line[idx] & !(0xffff << shift)) | ((val & 0xffff) << shift);
}

/// Get a 32-bit sample.
#[inline]
pub fn get_data_four_bytes(line: &[u32], x: u32) -> u32 {
    line[x as usize]
}

/// Set a 32-bit sample.
#[inline]
pub fn set_data_four_bytes(line: &mut [u32], x: u32, val: u32) {
    line[x as usize] = val;
}
