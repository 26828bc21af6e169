//! Error types for the Fieldscale estimator

use fieldscale_filter::FilterError;
use fieldscale_io::IoError;
use fieldscale_transform::TransformError;
use thiserror::Error;

/// Errors returned by [`Fieldscale`](crate::Fieldscale)
#[derive(Debug, Error)]
pub enum FieldscaleError {
    /// Invalid options, reported by `Fieldscale::new` before any frame
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The frame cannot be processed (pixel layout, size)
    #[error("invalid input: {0}")]
    Input(String),

    /// The input path could not be read or decoded
    #[error("cannot read input: {0}")]
    Io(#[from] IoError),

    /// Image and bound fields disagree in size
    #[error("shape mismatch: image is {expected:?}, field is {actual:?}")]
    ShapeMismatch {
        /// Image dimensions (width, height)
        expected: (u32, u32),
        /// Field dimensions (width, height)
        actual: (u32, u32),
    },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] fieldscale_core::Error),

    /// Field resampling error
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
}

impl From<FilterError> for FieldscaleError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::Core(e) => Self::Core(e),
            FilterError::InvalidParameters(msg) => Self::Configuration(msg),
            FilterError::ShapeMismatch { expected, actual } => {
                Self::ShapeMismatch { expected, actual }
            }
            e @ (FilterError::UnsupportedDepth { .. } | FilterError::ImageTooSmall { .. }) => {
                Self::Input(e.to_string())
            }
        }
    }
}

/// Result type for estimator operations
pub type FieldscaleResult<T> = Result<T, FieldscaleError>;
