//! Error types for nest-core

use thiserror::Error;

/// Errors that can occur constructing or manipulating a [`crate::Bitmap`]
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid bitmap dimensions
    #[error("invalid bitmap dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },
}

/// Result type alias for nest-core operations
pub type Result<T> = std::result::Result<T, Error>;
