//! Error types for fieldscale-transform

use thiserror::Error;

/// Errors that can occur while resampling fields
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] fieldscale_core::Error),

    /// Invalid target size or other parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
