//! Grid diffusion (message passing)
//!
//! Each round replaces every cell by the mean of itself and its radius-1
//! neighbors, but only in one direction: a max grid may only rise toward
//! its neighborhood and a min grid may only fall. Repeating the round
//! spreads strong bounds into the surrounding cells and removes the block
//! structure left by grid reduction.
//!
//! All reads within a round come from the grid as it was at the start of
//! that round.

use crate::grid::GridShape;
use crate::neighbors::neighbor_cells;
use fieldscale_core::Grid;
use tracing::trace;

/// Default neighborhood radius for diffusion
pub const DEFAULT_DIFFUSION_RADIUS: u32 = 1;

/// Default number of diffusion rounds
pub const DEFAULT_ITERATIONS: u32 = 7;

/// Direction a cell is allowed to move in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `max(mean, cell)`; used for the max grid
    Increase,
    /// `min(mean, cell)`; used for the min grid
    Decrease,
}

/// One diffusion round with the default radius
pub fn propagate(grid: &Grid, direction: Direction) -> Grid {
    propagate_with_radius(grid, direction, DEFAULT_DIFFUSION_RADIUS)
}

/// One diffusion round
///
/// The mean covers the cell itself plus every in-bounds neighbor within
/// `radius`. With `radius == 0` the mean is the cell and the grid is
/// returned unchanged.
pub fn propagate_with_radius(grid: &Grid, direction: Direction, radius: u32) -> Grid {
    let shape = GridShape::of(grid);
    let mut out = grid.clone();

    for row in 0..shape.rows {
        for col in 0..shape.cols {
            let value = grid.get_pixel_unchecked(col, row);
            let neighbors = neighbor_cells(shape, (row, col), radius);
            // Offsets from the cell keep an all-equal neighborhood exact
            let offset: f64 = neighbors
                .iter()
                .map(|&(r, c)| grid.get_pixel_unchecked(c, r) - value)
                .sum();
            let mean = value + offset / (neighbors.len() + 1) as f64;

            let new_value = match direction {
                Direction::Increase => mean.max(value),
                Direction::Decrease => mean.min(value),
            };
            out.set_pixel_unchecked(col, row, new_value);
        }
    }

    out
}

/// Run `iterations` diffusion rounds, each on the output of the last
pub fn diffuse(grid: &Grid, direction: Direction, iterations: u32, radius: u32) -> Grid {
    let mut current = grid.clone();
    for round in 0..iterations {
        current = propagate_with_radius(&current, direction, radius);
        trace!(
            round,
            ?direction,
            min = current.min_value(),
            max = current.max_value(),
            "diffusion round"
        );
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_lifts_neighbors_of_peak() {
        let mut g = Grid::new_with_value(3, 3, 0.0).unwrap();
        g.set_pixel(1, 1, 900.0).unwrap();
        let out = propagate(&g, Direction::Increase);
        // Corner: mean of 4 cells containing the peak
        assert_eq!(out.get_pixel(0, 0).unwrap(), 225.0);
        // Edge: mean of 6 cells
        assert_eq!(out.get_pixel(1, 0).unwrap(), 150.0);
        // The peak itself is above its mean (100) and stays put
        assert_eq!(out.get_pixel(1, 1).unwrap(), 900.0);
    }

    #[test]
    fn test_decrease_lowers_only() {
        let mut g = Grid::new_with_value(3, 3, 100.0).unwrap();
        g.set_pixel(0, 0, 0.0).unwrap();
        let out = propagate(&g, Direction::Decrease);
        assert_eq!(out.get_pixel(0, 0).unwrap(), 0.0);
        assert!((out.get_pixel(1, 0).unwrap() - 500.0 / 6.0).abs() < 1e-9);
        assert_eq!(out.get_pixel(2, 2).unwrap(), 100.0);
    }

    #[test]
    fn test_reads_come_from_round_start() {
        // On a 1x3 row [0, 0, 30], cell 1 sees the original 30 and
        // cell 0 sees the original 0, not the updated cell 1.
        let g = Grid::from_data(3, 1, vec![0.0, 0.0, 30.0]).unwrap();
        let out = propagate(&g, Direction::Increase);
        assert_eq!(out.data(), &[0.0, 10.0, 30.0]);
    }

    #[test]
    fn test_uniform_grid_is_fixed_point() {
        let g = Grid::new_with_value(8, 8, 4321.0).unwrap();
        assert_eq!(diffuse(&g, Direction::Increase, 7, 1), g);
        assert_eq!(diffuse(&g, Direction::Decrease, 7, 1), g);
    }

    #[test]
    fn test_uniform_fractional_grid_is_fixed_point() {
        for v in [0.1, 1400.3, 27123.7] {
            let g = Grid::new_with_value(8, 8, v).unwrap();
            for radius in [1, 2] {
                assert_eq!(propagate_with_radius(&g, Direction::Increase, radius), g, "{v}");
                assert_eq!(propagate_with_radius(&g, Direction::Decrease, radius), g, "{v}");
            }
        }
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let g = Grid::from_data(2, 1, vec![1.0, 2.0]).unwrap();
        assert_eq!(diffuse(&g, Direction::Increase, 0, 1), g);
    }
}
