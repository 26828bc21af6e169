//! Error types for fieldscale-filter

use thiserror::Error;

/// Errors that can occur in the grid, diffusion and rescaling stages
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] fieldscale_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth {
        /// Expected depth description
        expected: &'static str,
        /// Actual depth in bits
        actual: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The image has fewer pixels than the grid has cells along an axis
    #[error("image {width}x{height} is smaller than the {rows}x{cols} grid")]
    ImageTooSmall {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Grid rows
        rows: u32,
        /// Grid columns
        cols: u32,
    },

    /// Image and bound fields differ in size
    #[error("shape mismatch: image is {expected:?}, field is {actual:?}")]
    ShapeMismatch {
        /// Image dimensions (width, height)
        expected: (u32, u32),
        /// Field dimensions (width, height)
        actual: (u32, u32),
    },
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
