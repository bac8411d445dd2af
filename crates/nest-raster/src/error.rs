//! Error types for nest-raster

use thiserror::Error;

/// Errors raised while rasterizing an outline.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Core bitmap error.
    #[error("core error: {0}")]
    Core(#[from] nest_core::Error),

    /// Precision must be a positive number of model units per pixel.
    #[error("invalid precision: {0} (must be > 0)")]
    InvalidPrecision(f64),
}

/// Result type for rasterization operations.
pub type RasterResult<T> = std::result::Result<T, RasterError>;
