//! Rolling history of previously seen images.

use std::borrow::Cow;

use rand::Rng;

use coocop_core::{CoreError, Image, Pixel, Result};

/// Default number of images kept in the history.
pub const DEFAULT_IMAGE_BUFFER_SIZE: usize = 128;

/// A bounded bag of past images that augmentations draw pixels from.
///
/// Order carries no meaning. Slots are picked uniformly at random both for
/// reading and for eviction, so the buffer behaves like a cheap reservoir
/// over the recent stream rather than a strict FIFO.
///
/// Sampling a full buffer takes the picked image out; sampling a partly
/// filled buffer leaves it resident. Together with the one insert per
/// augmentation call this keeps the length at `capacity` once warmed.
#[derive(Debug, Clone)]
pub struct RollingImageBuffer<T: Pixel> {
    images: Vec<Image<T>>,
    capacity: usize,
}

impl<T: Pixel> RollingImageBuffer<T> {
    /// Create an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CoreError::invalid_config("image_buffer_size", "> 0", capacity));
        }
        Ok(Self {
            images: Vec::with_capacity(capacity),
            capacity,
        })
    }

    /// Maximum number of images held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of images currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True if no image has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// True if the buffer holds `capacity` images.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.images.len() >= self.capacity
    }

    /// Store an image, evicting a random resident first if the buffer is full.
    pub fn insert<R: Rng + ?Sized>(&mut self, image: Image<T>, rng: &mut R) {
        if self.is_full() {
            let slot = rng.gen_range(0..self.images.len());
            self.images.swap_remove(slot);
            tracing::trace!(slot, capacity = self.capacity, "evicted image on insert");
        }
        self.images.push(image);
    }

    /// Draw a uniformly random image.
    ///
    /// Returns `None` on an empty buffer. On a full buffer the drawn image is
    /// removed and returned owned; otherwise it is borrowed and stays.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cow<'_, Image<T>>> {
        if self.images.is_empty() {
            return None;
        }
        let slot = rng.gen_range(0..self.images.len());
        if self.is_full() {
            tracing::trace!(slot, capacity = self.capacity, "took image from full buffer");
            Some(Cow::Owned(self.images.swap_remove(slot)))
        } else {
            Some(Cow::Borrowed(&self.images[slot]))
        }
    }

    /// Drop every stored image.
    pub fn clear(&mut self) {
        self.images.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coocop_core::Seed;

    fn constant(value: f32) -> Image<f32> {
        Image::filled((2, 2, 1), value).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = RollingImageBuffer::<f32>::new(0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_buffer_has_no_sample() {
        let mut rng = Seed::new(1).to_rng();
        let mut buffer = RollingImageBuffer::<f32>::new(3).unwrap();
        assert!(buffer.sample(&mut rng).is_none());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sample_below_capacity_keeps_image() {
        let mut rng = Seed::new(2).to_rng();
        let mut buffer = RollingImageBuffer::new(3).unwrap();
        buffer.insert(constant(1.0), &mut rng);
        buffer.insert(constant(2.0), &mut rng);

        let sampled = buffer.sample(&mut rng).unwrap();
        assert!(matches!(sampled, Cow::Borrowed(_)));
        drop(sampled);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_sample_at_capacity_removes_image() {
        let mut rng = Seed::new(3).to_rng();
        let mut buffer = RollingImageBuffer::new(2).unwrap();
        buffer.insert(constant(1.0), &mut rng);
        buffer.insert(constant(2.0), &mut rng);
        assert!(buffer.is_full());

        let sampled = buffer.sample(&mut rng).unwrap();
        assert!(matches!(sampled, Cow::Owned(_)));
        drop(sampled);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_insert_never_exceeds_capacity() {
        let mut rng = Seed::new(4).to_rng();
        let mut buffer = RollingImageBuffer::new(3).unwrap();
        for i in 0..20 {
            buffer.insert(constant(i as f32), &mut rng);
            assert!(buffer.len() <= 3);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.capacity(), 3);
    }

    #[test]
    fn test_eviction_is_not_fifo() {
        // With FIFO eviction only the last three values would survive every run.
        let mut kept_old = false;
        for seed in 0..20 {
            let mut rng = Seed::new(seed).to_rng();
            let mut buffer = RollingImageBuffer::new(3).unwrap();
            for i in 0..6 {
                buffer.insert(constant(i as f32), &mut rng);
            }
            kept_old |= buffer
                .images
                .iter()
                .any(|img| img.get(0, 0, 0).is_some_and(|v| v < 3.0));
        }
        assert!(kept_old);
    }

    #[test]
    fn test_clear() {
        let mut rng = Seed::new(5).to_rng();
        let mut buffer = RollingImageBuffer::new(2).unwrap();
        buffer.insert(constant(1.0), &mut rng);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
