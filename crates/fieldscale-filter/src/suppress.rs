//! Local extrema suppression
//!
//! Clips grid cells that stand out from their neighborhood by more than a
//! threshold. A single very hot (or cold) patch would otherwise dominate
//! the bound of everything around it once the grid is diffused and
//! resampled.
//!
//! A cell is a candidate when it is >= every neighbor ([`Extrema::Max`])
//! or <= every neighbor ([`Extrema::Min`]). A candidate further than
//! `threshold` from the neighbor mean is moved to exactly
//! `mean + threshold` (or `mean - threshold`). Everything else is left
//! alone. The pass visits each cell once in row-major order.

use crate::grid::GridShape;
use crate::neighbors::neighbor_cells;
use fieldscale_core::Grid;

/// Default neighborhood radius for suppression
pub const DEFAULT_SUPPRESSION_RADIUS: u32 = 2;

/// Default threshold for the high-outlier pass
pub const DEFAULT_MAX_DIFF: f64 = 400.0;

/// Default threshold for the low-outlier pass
pub const DEFAULT_MIN_DIFF: f64 = 400.0;

/// Which kind of outlier to clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extrema {
    /// Local maxima above `mean + threshold`
    Max,
    /// Local minima below `mean - threshold`
    Min,
}

/// Where neighbor values are read from during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Update in place; cells visited later see earlier clipped values
    #[default]
    Sequential,
    /// Read every neighbor from the grid as it was before the pass
    Snapshot,
}

/// Suppress local extrema in place
///
/// # Arguments
/// * `grid` - Grid to modify
/// * `distance` - Neighborhood radius; 0 disables suppression
/// * `threshold` - Allowed distance from the neighbor mean; a value that
///   is not strictly positive disables suppression
/// * `extrema` - Clip maxima or minima
/// * `order` - Neighbor read policy
///
/// # Returns
/// Number of cells that were clipped
pub fn suppress_local_extrema(
    grid: &mut Grid,
    distance: u32,
    threshold: f64,
    extrema: Extrema,
    order: ScanOrder,
) -> usize {
    if distance == 0 || !(threshold > 0.0) {
        return 0;
    }

    let shape = GridShape::of(grid);
    let snapshot = match order {
        ScanOrder::Snapshot => Some(grid.clone()),
        ScanOrder::Sequential => None,
    };

    let mut clipped = 0;
    for row in 0..shape.rows {
        for col in 0..shape.cols {
            let neighbors = neighbor_cells(shape, (row, col), distance);
            if neighbors.is_empty() {
                continue;
            }

            let source = snapshot.as_ref().unwrap_or(&*grid);
            let value = source.get_pixel_unchecked(col, row);
            let mut sum = 0.0;
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for &(r, c) in &neighbors {
                let v = source.get_pixel_unchecked(c, r);
                sum += v;
                lo = lo.min(v);
                hi = hi.max(v);
            }
            let mean = sum / neighbors.len() as f64;

            let replacement = match extrema {
                Extrema::Max if value >= hi && value - mean > threshold => Some(mean + threshold),
                Extrema::Min if value <= lo && mean - value > threshold => Some(mean - threshold),
                _ => None,
            };

            if let Some(new_value) = replacement {
                grid.set_pixel_unchecked(col, row, new_value);
                clipped += 1;
            }
        }
    }

    clipped
}
