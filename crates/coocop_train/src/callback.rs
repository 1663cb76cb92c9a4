//! Callback hooks that connect a training loop to epoch-aware augmentations.

use crate::error::{Result, TrainError};
use crate::shared::{EpochAware, SharedTransform};

/// Context passed to callbacks containing training progress.
#[derive(Debug, Clone)]
pub struct CallbackContext {
    /// Current epoch (0-indexed).
    pub epoch: usize,
    /// Total number of epochs.
    pub n_epochs: usize,
}

impl CallbackContext {
    /// Create a new callback context.
    pub fn new(n_epochs: usize) -> Self {
        Self { epoch: 0, n_epochs }
    }
}

/// Trait for training callbacks.
///
/// The training loop owns the epoch counter and calls these hooks; the
/// augmentations never read the schedule on their own.
pub trait Callback: Send + Sync {
    /// Called before training starts.
    fn before_fit(&mut self, _ctx: &mut CallbackContext) -> Result<()> {
        Ok(())
    }

    /// Called before each epoch.
    fn before_epoch(&mut self, _ctx: &mut CallbackContext) -> Result<()> {
        Ok(())
    }

    /// Get the callback name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A list of callbacks.
#[derive(Default)]
pub struct CallbackList {
    callbacks: Vec<Box<dyn Callback>>,
}

impl CallbackList {
    /// Create a new empty callback list.
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Add a callback.
    pub fn add<C: Callback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// True if no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Call before_fit on all callbacks.
    pub fn before_fit(&mut self, ctx: &mut CallbackContext) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.before_fit(ctx)?;
        }
        Ok(())
    }

    /// Call before_epoch on all callbacks.
    pub fn before_epoch(&mut self, ctx: &mut CallbackContext) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.before_epoch(ctx)?;
        }
        Ok(())
    }
}

/// Forwards every epoch start to an epoch-aware transform.
///
/// # Example
///
/// ```rust
/// use coocop_transforms::{CopyPairing, CopyPairingConfig};
/// use coocop_train::{Callback, CallbackContext, EpochNotifyCallback, SharedTransform};
///
/// let cop = CopyPairing::<f32>::new(CopyPairingConfig::new(16, 5, 40, 1, 1)).unwrap();
/// let shared = SharedTransform::new(cop);
/// let mut callback = EpochNotifyCallback::new(shared.clone());
///
/// let mut ctx = CallbackContext::new(40);
/// ctx.epoch = 7;
/// callback.before_epoch(&mut ctx).unwrap();
/// assert_eq!(shared.lock().current_epoch(), 7);
/// ```
pub struct EpochNotifyCallback<X> {
    transform: SharedTransform<X>,
}

impl<X: EpochAware + Send> EpochNotifyCallback<X> {
    /// Create a callback driving `transform`.
    pub fn new(transform: SharedTransform<X>) -> Self {
        Self { transform }
    }

    /// The transform being driven.
    pub fn transform(&self) -> &SharedTransform<X> {
        &self.transform
    }
}

impl<X: EpochAware + Send> Callback for EpochNotifyCallback<X> {
    fn before_fit(&mut self, ctx: &mut CallbackContext) -> Result<()> {
        tracing::info!("EpochNotify: driving augmentation over {} epochs", ctx.n_epochs);
        Ok(())
    }

    fn before_epoch(&mut self, ctx: &mut CallbackContext) -> Result<()> {
        let epoch = i64::try_from(ctx.epoch).map_err(|_| {
            TrainError::CallbackError(format!("epoch {} does not fit in i64", ctx.epoch))
        })?;
        self.transform.lock().advance_epoch(epoch);
        tracing::debug!("EpochNotify: epoch {}/{}", ctx.epoch + 1, ctx.n_epochs);
        Ok(())
    }

    fn name(&self) -> &str {
        "EpochNotifyCallback"
    }
}
