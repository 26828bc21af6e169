//! fieldscale-transform - Resampling of coarse grids to image resolution
//!
//! The rescaling pipeline estimates its bounds on a small grid and then
//! stretches each grid to the full frame with bilinear interpolation.

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{resize_linear, resize_linear_to};
