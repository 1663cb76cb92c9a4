//! Image shape metadata.

use serde::{Deserialize, Serialize};

/// Shape of an image in `(H, W, C)` order.
///
/// # Example
///
/// ```rust
/// use coocop_core::ImageShape;
///
/// let shape = ImageShape::new(31, 33, 3);
/// assert_eq!(shape.height(), 31);
/// assert_eq!(shape.width(), 33);
/// assert_eq!(shape.channels(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageShape {
    height: usize,
    width: usize,
    channels: usize,
}

impl ImageShape {
    /// Create a new shape.
    #[must_use]
    pub const fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of channels.
    #[must_use]
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// `(height, width)` pair used by region sampling.
    #[must_use]
    pub const fn spatial(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Total number of elements.
    #[must_use]
    pub const fn numel(&self) -> usize {
        self.height * self.width * self.channels
    }

    /// True if any dimension is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0 || self.channels == 0
    }

    /// Convert to a tuple usable as an `ndarray` shape.
    #[must_use]
    pub const fn as_tuple(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }
}

impl From<(usize, usize, usize)> for ImageShape {
    fn from((height, width, channels): (usize, usize, usize)) -> Self {
        Self::new(height, width, channels)
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.height, self.width, self.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_accessors() {
        let shape = ImageShape::new(4, 5, 3);
        assert_eq!(shape.spatial(), (4, 5));
        assert_eq!(shape.numel(), 60);
        assert!(!shape.is_empty());
        assert_eq!(shape.to_string(), "(4, 5, 3)");
    }

    #[test]
    fn test_shape_empty() {
        assert!(ImageShape::new(0, 5, 3).is_empty());
        assert!(ImageShape::new(4, 5, 0).is_empty());
    }
}
