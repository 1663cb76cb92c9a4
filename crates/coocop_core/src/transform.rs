//! Transform trait for stateful image augmentation.

use crate::error::Result;
use crate::image::Image;
use crate::pixel::Pixel;
use crate::split::Split;

/// An augmentation applied to one image at a time.
///
/// Unlike a pure function, a transform may carry state across calls (a
/// history buffer, a random stream, an epoch schedule), so `apply` takes
/// `&mut self`. Calls are expected to come sequentially from one training
/// loop.
///
/// # Example
///
/// ```rust
/// use coocop_core::{Image, Result, Split, Transform};
///
/// struct Invert;
///
/// impl Transform<u8> for Invert {
///     fn apply(&mut self, image: Image<u8>, split: Split) -> Result<Image<u8>> {
///         if split.is_eval() {
///             return Ok(image);
///         }
///         Image::new(image.into_array().mapv(|v| 255 - v))
///     }
/// }
/// ```
pub trait Transform<T: Pixel>: Send {
    /// Apply the transform to an image.
    ///
    /// The returned image always has the shape of the input.
    fn apply(&mut self, image: Image<T>, split: Split) -> Result<Image<T>>;

    /// Get the name of this transform for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Check if this transform should be applied for the given split.
    ///
    /// By default, transforms are applied to all splits.
    fn should_apply(&self, _split: Split) -> bool {
        true
    }
}

/// Identity transform that passes through data unchanged.
#[derive(Debug, Clone, Default)]
pub struct Identity;

impl<T: Pixel> Transform<T> for Identity {
    fn apply(&mut self, image: Image<T>, _split: Split) -> Result<Image<T>> {
        Ok(image)
    }

    fn name(&self) -> &str {
        "Identity"
    }
}

/// A composed transform that applies multiple transforms in sequence.
pub struct Compose<T: Pixel> {
    transforms: Vec<Box<dyn Transform<T>>>,
}

impl<T: Pixel> Compose<T> {
    /// Create a new empty composition.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Append a transform, builder style.
    #[must_use]
    pub fn add<X: Transform<T> + 'static>(mut self, transform: X) -> Self {
        self.push(transform);
        self
    }

    /// Add a transform to the composition.
    pub fn push<X: Transform<T> + 'static>(&mut self, transform: X) {
        self.transforms.push(Box::new(transform));
    }

    /// Number of transforms in the composition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// True if the composition holds no transforms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl<T: Pixel> Default for Compose<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pixel> Transform<T> for Compose<T> {
    fn apply(&mut self, mut image: Image<T>, split: Split) -> Result<Image<T>> {
        for transform in &mut self.transforms {
            if transform.should_apply(split) {
                image = transform.apply(image, split)?;
            }
        }
        Ok(image)
    }

    fn name(&self) -> &str {
        "Compose"
    }
}
