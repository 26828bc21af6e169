//! Grid-wise reduction
//!
//! Partitions an image into `rows x cols` equal rectangular patches and
//! reduces each patch to its minimum or maximum sample.
//!
//! Patch size is `floor(height / rows) x floor(width / cols)`, tiled from
//! the origin. When the image size is not a multiple of the grid shape,
//! the leftover rows at the bottom and columns at the right are not part
//! of any patch and never influence the grid.
//!
//! The resulting [`Grid`] is `cols` cells wide and `rows` cells high, so
//! the cell for patch `(row, col)` is at `(x, y) = (col, row)`.

use crate::{FilterError, FilterResult};
use fieldscale_core::{Grid, Pix};

/// Default number of grid rows
pub const DEFAULT_GRID_ROWS: u32 = 8;

/// Default number of grid columns
pub const DEFAULT_GRID_COLS: u32 = 8;

/// Shape of the coarse grid laid over an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of patches vertically
    pub rows: u32,
    /// Number of patches horizontally
    pub cols: u32,
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

impl GridShape {
    /// Create a grid shape
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Shape of an existing grid
    pub fn of(grid: &Grid) -> Self {
        Self {
            rows: grid.height(),
            cols: grid.width(),
        }
    }

    /// Check that neither dimension is zero
    pub fn validate(&self) -> FilterResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(FilterError::InvalidParameters(format!(
                "grid shape must be non-zero, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Patch size `(width, height)` for an image of the given size
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::ImageTooSmall`] if a patch would be empty.
    pub fn patch_size(&self, width: u32, height: u32) -> FilterResult<(u32, u32)> {
        self.validate()?;
        let patch_w = width / self.cols;
        let patch_h = height / self.rows;
        if patch_w == 0 || patch_h == 0 {
            return Err(FilterError::ImageTooSmall {
                width,
                height,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((patch_w, patch_h))
    }
}

/// Reduction applied to each patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Smallest sample in the patch
    Min,
    /// Largest sample in the patch
    Max,
}

/// Reduce each patch of `pix` to a single value
///
/// Works on 8, 16 and 32 bpp images. Every output cell holds a sample
/// value that is actually present in its patch.
pub fn gridwise_reduce(pix: &Pix, shape: GridShape, op: ReduceOp) -> FilterResult<Grid> {
    let (grid_min, grid_max) = gridwise_min_max(pix, shape)?;
    Ok(match op {
        ReduceOp::Min => grid_min,
        ReduceOp::Max => grid_max,
    })
}

/// Per-patch minimum
pub fn gridwise_min(pix: &Pix, shape: GridShape) -> FilterResult<Grid> {
    gridwise_reduce(pix, shape, ReduceOp::Min)
}

/// Per-patch maximum
pub fn gridwise_max(pix: &Pix, shape: GridShape) -> FilterResult<Grid> {
    gridwise_reduce(pix, shape, ReduceOp::Max)
}

/// Per-patch minimum and maximum in a single pass over the image
///
/// Returns `(min_grid, max_grid)`.
pub fn gridwise_min_max(pix: &Pix, shape: GridShape) -> FilterResult<(Grid, Grid)> {
    let (patch_w, patch_h) = shape.patch_size(pix.width(), pix.height())?;

    let mut grid_min = Grid::new(shape.cols, shape.rows)?;
    let mut grid_max = Grid::new(shape.cols, shape.rows)?;

    for row in 0..shape.rows {
        for col in 0..shape.cols {
            let x0 = col * patch_w;
            let y0 = row * patch_h;

            let mut min_val = u32::MAX;
            let mut max_val = 0u32;
            for y in y0..(y0 + patch_h) {
                for x in x0..(x0 + patch_w) {
                    let val = pix.get_pixel_unchecked(x, y);
                    min_val = min_val.min(val);
                    max_val = max_val.max(val);
                }
            }

            grid_min.set_pixel_unchecked(col, row, f64::from(min_val));
            grid_max.set_pixel_unchecked(col, row, f64::from(max_val));
        }
    }

    Ok((grid_min, grid_max))
}
