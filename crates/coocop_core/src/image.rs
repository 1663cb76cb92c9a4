//! Dense `(H, W, C)` image buffers.

use std::ops::Range;

use ndarray::{s, Array3, Zip};

use crate::error::{CoreError, Result};
use crate::pixel::Pixel;
use crate::shape::ImageShape;

/// A dense height x width x channel image.
///
/// Wraps an [`Array3`] and guarantees every dimension is non-zero, so any
/// image can host a region centre. The element type is free but must stay
/// the same for every image handed to one transform.
///
/// # Example
///
/// ```rust
/// use coocop_core::{Image, ImageShape};
///
/// let img = Image::filled(ImageShape::new(31, 33, 3), 0.5_f32).unwrap();
/// assert_eq!(img.shape(), ImageShape::new(31, 33, 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T: Pixel> {
    data: Array3<T>,
}

impl<T: Pixel> Image<T> {
    /// Wrap an existing array.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidShape`] if any dimension is zero.
    pub fn new(data: Array3<T>) -> Result<Self> {
        let (h, w, c) = data.dim();
        let shape = ImageShape::new(h, w, c);
        if shape.is_empty() {
            return Err(CoreError::InvalidShape {
                expected: "(h > 0, w > 0, c > 0)".to_string(),
                got: shape.to_string(),
            });
        }
        Ok(Self { data })
    }

    /// Build an image from row-major `(H, W, C)` values.
    ///
    /// # Errors
    ///
    /// Returns an error if `values` does not hold exactly `shape.numel()`
    /// elements or the shape has a zero dimension.
    pub fn from_shape_vec(shape: impl Into<ImageShape>, values: Vec<T>) -> Result<Self> {
        let shape = shape.into();
        let got = values.len();
        let data = Array3::from_shape_vec(shape.as_tuple(), values).map_err(|_| {
            CoreError::InvalidShape {
                expected: format!("{} values for shape {shape}", shape.numel()),
                got: format!("{got} values"),
            }
        })?;
        Self::new(data)
    }

    /// An image with every element set to `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape has a zero dimension.
    pub fn filled(shape: impl Into<ImageShape>, value: T) -> Result<Self> {
        Self::new(Array3::from_elem(shape.into().as_tuple(), value))
    }

    /// Shape of the image.
    #[must_use]
    pub fn shape(&self) -> ImageShape {
        self.data.dim().into()
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    /// Number of channels.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// Borrow the underlying array.
    #[must_use]
    pub fn as_array(&self) -> &Array3<T> {
        &self.data
    }

    /// Consume the image and return the underlying array.
    #[must_use]
    pub fn into_array(self) -> Array3<T> {
        self.data
    }

    /// Element at `(row, col, channel)`, if in bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<T> {
        self.data.get((row, col, channel)).copied()
    }

    /// Overwrite `rows x cols` of this image with the equally sized block of
    /// `src` starting at `(src_row, src_col)`. All channels are copied.
    ///
    /// An empty row or column range is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the channel counts differ or
    /// either block does not fit inside its image.
    pub fn copy_region_from(
        &mut self,
        src: &Image<T>,
        rows: Range<usize>,
        cols: Range<usize>,
        src_row: usize,
        src_col: usize,
    ) -> Result<()> {
        if self.channels() != src.channels() {
            return Err(CoreError::ShapeMismatch(format!(
                "cannot copy from {} channels into {} channels",
                src.channels(),
                self.channels()
            )));
        }
        if rows.is_empty() || cols.is_empty() {
            return Ok(());
        }

        let size_y = rows.len();
        let size_x = cols.len();
        if rows.end > self.height()
            || cols.end > self.width()
            || src_row + size_y > src.height()
            || src_col + size_x > src.width()
        {
            return Err(CoreError::ShapeMismatch(format!(
                "region {size_y}x{size_x} does not fit destination {} at ({}, {}) or source {} at ({src_row}, {src_col})",
                self.shape(),
                rows.start,
                cols.start,
                src.shape()
            )));
        }

        let block = src
            .data
            .slice(s![src_row..src_row + size_y, src_col..src_col + size_x, ..]);
        self.data.slice_mut(s![rows, cols, ..]).assign(&block);
        Ok(())
    }

    /// Element-wise arithmetic mean with another image of the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ShapeMismatch`] if the shapes differ.
    pub fn mean_with(&self, other: &Image<T>) -> Result<Image<T>> {
        if self.shape() != other.shape() {
            return Err(CoreError::ShapeMismatch(format!(
                "cannot blend {} with {}",
                self.shape(),
                other.shape()
            )));
        }
        let data = Zip::from(&self.data)
            .and(&other.data)
            .map_collect(|&a, &b| T::mean(a, b));
        Ok(Self { data })
    }
}

impl<T: Pixel> TryFrom<Array3<T>> for Image<T> {
    type Error = CoreError;

    fn try_from(data: Array3<T>) -> Result<Self> {
        Self::new(data)
    }
}

impl<T: Pixel> From<Image<T>> for Array3<T> {
    fn from(image: Image<T>) -> Self {
        image.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(h: usize, w: usize, c: usize) -> Image<f32> {
        let values = (0..h * w * c).map(|v| v as f32).collect();
        Image::from_shape_vec((h, w, c), values).unwrap()
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let err = Image::<f32>::new(Array3::zeros((0, 4, 3))).unwrap_err();
        assert!(matches!(err, CoreError::InvalidShape { .. }));
        assert!(Image::<u8>::filled((4, 4, 0), 0).is_err());
    }

    #[test]
    fn test_from_shape_vec_length_mismatch() {
        let err = Image::from_shape_vec((2, 2, 1), vec![1.0_f32; 3]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidShape { .. }));
    }

    #[test]
    fn test_copy_region_from() {
        let mut dst = Image::filled((4, 5, 2), -1.0_f32).unwrap();
        let src = ramp(3, 3, 2);

        dst.copy_region_from(&src, 1..3, 2..4, 1, 0).unwrap();

        // copied block
        assert_eq!(dst.get(1, 2, 0), src.get(1, 0, 0));
        assert_eq!(dst.get(1, 3, 1), src.get(1, 1, 1));
        assert_eq!(dst.get(2, 2, 0), src.get(2, 0, 0));
        assert_eq!(dst.get(2, 3, 1), src.get(2, 1, 1));
        // untouched
        assert_eq!(dst.get(0, 0, 0), Some(-1.0));
        assert_eq!(dst.get(3, 4, 1), Some(-1.0));
        assert_eq!(dst.get(1, 1, 0), Some(-1.0));
        assert_eq!(dst.shape(), ImageShape::new(4, 5, 2));
    }

    #[test]
    fn test_copy_empty_region_is_noop() {
        let mut dst = Image::filled((4, 4, 1), 1u8).unwrap();
        let src = Image::filled((4, 4, 1), 9u8).unwrap();
        let before = dst.clone();

        dst.copy_region_from(&src, 2..2, 0..4, 0, 0).unwrap();
        assert_eq!(dst, before);
    }

    #[test]
    fn test_copy_region_channel_mismatch() {
        let mut dst = Image::filled((4, 4, 3), 0.0_f32).unwrap();
        let src = Image::filled((4, 4, 1), 1.0_f32).unwrap();
        let err = dst.copy_region_from(&src, 0..2, 0..2, 0, 0).unwrap_err();
        assert!(matches!(err, CoreError::ShapeMismatch(_)));
    }

    #[test]
    fn test_copy_region_out_of_bounds() {
        let mut dst = Image::filled((4, 4, 1), 0.0_f32).unwrap();
        let src = Image::filled((2, 2, 1), 1.0_f32).unwrap();
        assert!(dst.copy_region_from(&src, 0..3, 0..2, 0, 0).is_err());
        assert!(dst.copy_region_from(&src, 0..2, 0..5, 0, 0).is_err());
    }

    #[test]
    fn test_mean_with_constant_images() {
        let a = Image::filled((31, 33, 3), 2.0_f32).unwrap();
        let b = Image::filled((31, 33, 3), 4.0_f32).unwrap();
        let mean = a.mean_with(&b).unwrap();
        assert_eq!(mean.shape(), a.shape());
        assert!(mean.as_array().iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_mean_with_shape_mismatch() {
        let a = Image::filled((4, 4, 3), 2u8).unwrap();
        let b = Image::filled((4, 5, 3), 4u8).unwrap();
        assert!(matches!(
            a.mean_with(&b).unwrap_err(),
            CoreError::ShapeMismatch(_)
        ));
    }
}
