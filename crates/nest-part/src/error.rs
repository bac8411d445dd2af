//! Error types for nest-part

use thiserror::Error;

/// Errors raised while loading a [`crate::Part`].
#[derive(Debug, Error)]
pub enum PartError {
    /// Rasterizer error.
    #[error("raster error: {0}")]
    Raster(#[from] nest_raster::RasterError),

    /// Transform (rotation) error.
    #[error("transform error: {0}")]
    Transform(#[from] nest_transform::TransformError),

    /// Invalid load parameters.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Every rotation's dilated bitmap exceeds the plate in at least one
    /// axis — the part cannot be placed at all, on any fan angle.
    #[error("part does not fit the plate at any rotation")]
    NoFittingRotation,
}

/// Result type for part-loading operations.
pub type PartResult<T> = std::result::Result<T, PartError>;
