//! Error types for coocop_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur in coocop operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A configuration parameter is out of its documented bounds.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid image shape provided.
    #[error("Invalid shape: expected {expected}, got {got}")]
    InvalidShape {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        got: String,
    },

    /// Shape mismatch between two images.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

impl CoreError {
    /// Shorthand for an [`CoreError::InvalidConfig`] naming the offending parameter.
    pub fn invalid_config(param: &str, bound: &str, got: impl std::fmt::Display) -> Self {
        Self::InvalidConfig(format!("\"{param}\" must be {bound}, got {got}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message() {
        let err = CoreError::invalid_config("extent", "> 0", 0);
        assert_eq!(
            err.to_string(),
            "Invalid configuration: \"extent\" must be > 0, got 0"
        );
    }

    #[test]
    fn test_invalid_shape_message() {
        let err = CoreError::InvalidShape {
            expected: "(h > 0, w > 0, c > 0)".to_string(),
            got: "(0, 4, 3)".to_string(),
        };
        assert!(err.to_string().contains("(0, 4, 3)"));
    }
}
