//! Error types for nest-placer

use thiserror::Error;

/// Errors raised while building or searching a plate.
#[derive(Debug, Error)]
pub enum PlacerError {
    /// Core bitmap error.
    #[error("core error: {0}")]
    Core(#[from] nest_core::Error),

    /// Non-positive plate dimension.
    #[error("invalid plate dimension: {0}")]
    InvalidDimension(String),
}

/// Result type for placer operations.
pub type PlacerResult<T> = std::result::Result<T, PlacerError>;
