//! Error taxonomy for the arrangement engine.

use thiserror::Error;

/// Errors surfaced to a caller of the arrangement engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed input rejected before any part was loaded: a bad
    /// contour, or a non-positive precision/spacing/plate dimension.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Cooperative cancellation observed; no per-item results are valid.
    #[error("arrangement cancelled")]
    Cancelled,

    /// Wraps a part-loading failure (zero usable rotations) in `strict`
    /// mode, where a single unfit-able part aborts the whole call rather
    /// than being recorded as a per-item `PartDoesNotFit`.
    #[error("part does not fit the plate: {0}")]
    PartDoesNotFit(#[from] nest_part::PartError),

    #[error(transparent)]
    Placer(#[from] nest_placer::PlacerError),

    #[error(transparent)]
    Raster(#[from] nest_raster::RasterError),

    #[error(transparent)]
    Core(#[from] nest_core::Error),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
