//! fieldscale-filter - Field estimation and rescaling stages
//!
//! This crate provides the stages of the field-based rescaling pipeline:
//!
//! - Grid-wise min/max reduction of an image ([`grid`])
//! - Neighborhood enumeration on a grid ([`neighbors`])
//! - Local extrema suppression ([`suppress`])
//! - One-sided diffusion of grids ([`diffusion`])
//! - Temporal blending of bound fields ([`temporal`])
//! - Field-guided rescaling to 8 bpp ([`rescale`])
//! - Gamma tone curve ([`enhance`])
//! - Contrast-limited adaptive histogram equalization ([`clahe`])

pub mod clahe;
pub mod diffusion;
pub mod enhance;
mod error;
pub mod grid;
pub mod neighbors;
pub mod rescale;
pub mod suppress;
pub mod temporal;

pub use error::{FilterError, FilterResult};

// Re-export commonly used items
pub use clahe::{Clahe, ClaheOptions, LocalContrast, clahe};
pub use diffusion::{Direction, diffuse, propagate, propagate_with_radius};
pub use enhance::{TrcLut, gamma_correct, gamma_trc, trc_map};
pub use grid::{GridShape, ReduceOp, gridwise_max, gridwise_min, gridwise_min_max, gridwise_reduce};
pub use neighbors::neighbor_cells;
pub use rescale::{DEGENERATE_BAND_VALUE, rescale_value, rescale_with_fields};
pub use suppress::{Extrema, ScanOrder, suppress_local_extrema};
pub use temporal::{BoundFields, TemporalBlender, blend_fields};
