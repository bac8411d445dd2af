//! Error types for nest-transform

use thiserror::Error;

/// Errors raised while rotating a bitmap.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core bitmap error.
    #[error("core error: {0}")]
    Core(#[from] nest_core::Error),
}

/// Result type for transform operations.
pub type TransformResult<T> = std::result::Result<T, TransformError>;
