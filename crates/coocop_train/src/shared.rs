//! Shared handle to a stateful transform.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use coocop_core::{Image, Pixel, Result, Split, Transform};
use coocop_transforms::{CopyPairing, Copyout};

/// A transform that reacts to epoch boundaries.
pub trait EpochAware {
    /// Announce the epoch that is about to start.
    fn advance_epoch(&mut self, epoch: i64);
}

impl<T: Pixel> EpochAware for CopyPairing<T> {
    fn advance_epoch(&mut self, epoch: i64) {
        CopyPairing::advance_epoch(self, epoch);
    }
}

impl<T: Pixel> EpochAware for Copyout<T> {
    fn advance_epoch(&mut self, _epoch: i64) {}
}

/// A transform reachable from both the data pipeline and a callback.
///
/// Transforms own mutable history and counters, so the two call sites
/// take turns through a mutex.
///
/// ```rust
/// use coocop_transforms::{CopyPairing, CopyPairingConfig};
/// use coocop_train::SharedTransform;
///
/// let cop = CopyPairing::<f32>::new(CopyPairingConfig::new(16, 5, 40, 1, 1)).unwrap();
/// let shared = SharedTransform::new(cop);
/// let for_callback = shared.clone();
///
/// for_callback.lock().advance_epoch(3);
/// assert_eq!(shared.lock().current_epoch(), 3);
/// ```
#[derive(Debug)]
pub struct SharedTransform<X> {
    inner: Arc<Mutex<X>>,
}

impl<X> SharedTransform<X> {
    /// Wrap a transform.
    pub fn new(transform: X) -> Self {
        Self {
            inner: Arc::new(Mutex::new(transform)),
        }
    }

    /// Lock the transform for exclusive use.
    pub fn lock(&self) -> MutexGuard<'_, X> {
        self.inner.lock()
    }
}

impl<X> Clone for SharedTransform<X> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, X> Transform<T> for SharedTransform<X>
where
    T: Pixel,
    X: Transform<T>,
{
    fn apply(&mut self, image: Image<T>, split: Split) -> Result<Image<T>> {
        self.inner.lock().apply(image, split)
    }

    fn name(&self) -> &str {
        "SharedTransform"
    }

    fn should_apply(&self, split: Split) -> bool {
        self.inner.lock().should_apply(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coocop_transforms::CopyPairingConfig;

    #[test]
    fn test_clones_share_state() {
        let cop = CopyPairing::<f32>::new(CopyPairingConfig::new(4, 1, 10, 1, 1)).unwrap();
        let mut pipeline = SharedTransform::new(cop);
        let notifier = pipeline.clone();

        let img = Image::filled((6, 6, 1), 0.0_f32).unwrap();
        pipeline.apply(img, Split::Train).unwrap();
        notifier.lock().advance_epoch(4);

        let guard = pipeline.lock();
        assert_eq!(guard.buffer_len(), 1);
        assert_eq!(guard.current_epoch(), 4);
    }

    #[test]
    fn test_copyout_ignores_epochs() {
        let mut coo = Copyout::<u8>::new(4).unwrap();
        EpochAware::advance_epoch(&mut coo, 12);
        assert_eq!(coo.buffer_len(), 0);
    }
}
