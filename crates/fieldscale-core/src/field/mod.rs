//! Field - double-precision 2D array
//!
//! `Field` stores one `f64` per cell in row-major order. It serves two roles
//! in the rescaling pipeline:
//!
//! - a coarse **grid** (e.g. 8x8) summarizing patches of the source image
//! - a full-resolution **field** of per-pixel lower or upper bounds
//!
//! [`Grid`] is an alias used where the coarse role is meant.
//!
//! # Examples
//!
//! ```
//! use fieldscale_core::Field;
//!
//! let mut grid = Field::new(8, 8).unwrap();
//! grid.set_pixel(3, 2, 1200.0).unwrap();
//! assert_eq!(grid.get_pixel(3, 2).unwrap(), 1200.0);
//! assert_eq!(grid.max_value(), Some(1200.0));
//! ```

use crate::error::{Error, Result};
use crate::pix::{Pix, PixelDepth};

/// A coarse field, one cell per image patch.
pub type Grid = Field;

/// Double-precision 2D array
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The cell at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl Field {
    /// Create a new Field with all cells set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new Field with all cells set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(Field {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a Field from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }
        Ok(Field {
            width,
            height,
            data,
        })
    }

    /// Create a Field holding the samples of a Pix, converted losslessly.
    pub fn from_pix(pix: &Pix) -> Self {
        let width = pix.width();
        let height = pix.height();
        let mut data = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                data.push(f64::from(pix.get_pixel_unchecked(x, y)));
            }
        }
        Field {
            width,
            height,
            data,
        }
    }

    /// Width in cells
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check whether two fields have the same dimensions.
    #[inline]
    pub fn sizes_equal(&self, other: &Field) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Get the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set the value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// Get the value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f64 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the value at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f64) {
        self.data[(y as usize) * (self.width as usize) + (x as usize)] = value;
    }

    /// Raw read-only data access.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Raw mutable data access.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Get row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f64] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Minimum value, ignoring NaN.
    pub fn min_value(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::min)
    }

    /// Maximum value, ignoring NaN.
    pub fn max_value(&self) -> Option<f64> {
        self.data
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Arithmetic mean of all cells.
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    /// Compute `a * field1 + b * field2` cell by cell.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the fields differ in size.
    pub fn linear_combination_two(a: f64, field1: &Field, b: f64, field2: &Field) -> Result<Field> {
        if !field1.sizes_equal(field2) {
            return Err(Error::DimensionMismatch {
                expected: field1.dimensions(),
                actual: field2.dimensions(),
            });
        }
        let data = field1
            .data
            .iter()
            .zip(&field2.data)
            .map(|(&v1, &v2)| a * v1 + b * v2)
            .collect();
        Ok(Field {
            width: field1.width,
            height: field1.height,
            data,
        })
    }

    /// Convert to a Pix by rounding and clamping to the depth range.
    ///
    /// Negative values and NaN map to 0.
    pub fn to_pix(&self, depth: PixelDepth) -> Result<Pix> {
        let max_val = f64::from(depth.max_value());
        let mut pm = Pix::new(self.width, self.height, depth)?.to_mut();
        for y in 0..self.height {
            for x in 0..self.width {
                let v = (self.get_pixel_unchecked(x, y) + 0.5).clamp(0.0, max_val);
                pm.set_pixel_unchecked(x, y, v as u32);
            }
        }
        Ok(pm.into())
    }
}

// ============================================================================
// Tests
// ============================================================================
