//! Error types for the training adapter.

use thiserror::Error;

/// Result type alias for training-loop operations.
pub type Result<T> = std::result::Result<T, TrainError>;

/// Errors raised while driving augmentations from a training loop.
#[derive(Error, Debug)]
pub enum TrainError {
    /// Callback error.
    #[error("Callback error: {0}")]
    CallbackError(String),

    /// Core error.
    #[error("Core error: {0}")]
    CoreError(#[from] coocop_core::CoreError),
}
