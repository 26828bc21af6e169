//! Grid neighborhoods
//!
//! Enumerates the cells within Chebyshev distance `d` of a grid cell,
//! excluding the cell itself and anything outside the grid.

use crate::grid::GridShape;

/// Cells around `(row, col)` within `max_distance`
///
/// The result is sorted ascending by `(row, col)`. A radius of 1 yields
/// at most 8 cells; corner cells get 3. A radius reaching past the grid
/// edge is cut to the grid, so any radius of at least
/// `max(rows, cols) - 1` selects every other cell.
pub fn neighbor_cells(shape: GridShape, (row, col): (u32, u32), max_distance: u32) -> Vec<(u32, u32)> {
    if shape.rows == 0 || shape.cols == 0 {
        return Vec::new();
    }

    let r0 = row.saturating_sub(max_distance);
    let r1 = row.saturating_add(max_distance).min(shape.rows - 1);
    let c0 = col.saturating_sub(max_distance);
    let c1 = col.saturating_add(max_distance).min(shape.cols - 1);
    if r0 > r1 || c0 > c1 {
        return Vec::new();
    }

    let window = ((r1 - r0 + 1) as usize) * ((c1 - c0 + 1) as usize);
    let mut cells = Vec::with_capacity(window.saturating_sub(1));
    for r in r0..=r1 {
        for c in c0..=c1 {
            if (r, c) != (row, col) {
                cells.push((r, c));
            }
        }
    }
    cells
}
