//! Data split the augmentation is running under.

use serde::{Deserialize, Serialize};

/// Which part of the data an image comes from.
///
/// Copyout and CopyPairing only augment training images. Validation and
/// test images pass through untouched and never enter the history buffer.
///
/// # Example
///
/// ```rust
/// use coocop_core::Split;
///
/// assert!(Split::Train.is_train());
/// assert!(Split::Test.is_eval());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Split {
    /// Training images, augmented.
    #[default]
    Train,
    /// Validation images.
    Valid,
    /// Test images.
    Test,
}

impl Split {
    /// Check if this is the training split.
    #[must_use]
    pub const fn is_train(&self) -> bool {
        matches!(self, Split::Train)
    }

    /// Check if this is an evaluation split (valid or test).
    #[must_use]
    pub const fn is_eval(&self) -> bool {
        matches!(self, Split::Valid | Split::Test)
    }
}

impl std::fmt::Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Split::Train => write!(f, "train"),
            Split::Valid => write!(f, "valid"),
            Split::Test => write!(f, "test"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_checks() {
        assert!(Split::Train.is_train());
        assert!(!Split::Train.is_eval());
        assert!(Split::Valid.is_eval());
        assert!(Split::Test.is_eval());
        assert!(!Split::Test.is_train());
    }

    #[test]
    fn test_split_default_is_train() {
        assert_eq!(Split::default(), Split::Train);
        assert_eq!(format!("{}", Split::Valid), "valid");
    }
}
