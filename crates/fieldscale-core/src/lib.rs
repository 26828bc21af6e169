//! Fieldscale Core - containers for field-based thermal rescaling
//!
//! This crate provides the data structures shared by every stage of the
//! rescaling pipeline:
//!
//! - [`Pix`] / [`PixMut`] - single-channel image (immutable / mutable)
//! - [`Field`] - double-precision 2D array, used both for coarse grids
//!   ([`Grid`]) and for full-resolution bound fields

pub mod error;
pub mod field;
pub mod pix;

pub use error::{Error, Result};
pub use field::{Field, Grid};
pub use pix::{ImageFormat, Pix, PixMut, PixelDepth};
