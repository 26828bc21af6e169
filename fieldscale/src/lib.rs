//! Fieldscale - locality-aware adaptive rescaling of thermal images
//!
//! Converts high bit depth single-channel frames (typically 16-bit
//! radiometric thermal images) into 8-bit images for display. Instead of
//! one global min/max, each pixel is stretched between a lower and an
//! upper bound *field* estimated from a coarse grid of local extrema.
//! The grid is cleaned of isolated outliers and diffused so that bounds
//! vary smoothly across the frame.
//!
//! # Example
//!
//! ```
//! use fieldscale::{Fieldscale, FieldscaleOptions, Pix, PixelDepth};
//!
//! let options = FieldscaleOptions {
//!     gamma: 0.0,
//!     clahe: false,
//!     ..Default::default()
//! };
//! let mut fs = Fieldscale::new(options).unwrap();
//!
//! let samples: Vec<u32> = (0..32 * 32).map(|i| 20000 + (i % 32) * 10).collect();
//! let frame = Pix::from_samples(32, 32, PixelDepth::Bit16, &samples).unwrap();
//! let out = fs.process(&frame).unwrap();
//! assert_eq!(out.depth(), PixelDepth::Bit8);
//! ```
//!
//! # Crates
//!
//! - [`core`](fieldscale_core) types are re-exported at the top level
//! - [`io`] reads and writes PNG and TIFF
//! - [`transform`] resamples grids to frame size
//! - [`filter`] holds the individual pipeline stages

mod estimator;
mod fieldscale_error;
mod options;

pub use estimator::Fieldscale;
pub use fieldscale_error::{FieldscaleError, FieldscaleResult};
pub use options::FieldscaleOptions;

// Re-export core types (primary data structures used everywhere)
pub use fieldscale_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use fieldscale_filter as filter;
pub use fieldscale_io as io;
pub use fieldscale_transform as transform;

pub use fieldscale_filter::{BoundFields, ClaheOptions, GridShape, LocalContrast, ScanOrder};
