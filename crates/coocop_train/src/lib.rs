//! # coocop_train
//!
//! Thin adapter between a training loop and the coocop augmentations.
//!
//! This crate provides:
//! - A [`Callback`] system with lifecycle hooks
//! - [`EpochNotifyCallback`], which forwards epoch starts to a transform
//! - [`SharedTransform`], a lockable handle usable from both the data
//!   pipeline and a callback
//!
//! ## Example
//!
//! ```rust
//! use coocop_core::{Image, Split, Transform};
//! use coocop_transforms::{CopyPairing, CopyPairingConfig};
//! use coocop_train::{CallbackContext, CallbackList, EpochNotifyCallback, SharedTransform};
//!
//! let cop = CopyPairing::<f32>::new(CopyPairingConfig::new(8, 1, 4, 1, 1)).unwrap();
//! let mut augment = SharedTransform::new(cop);
//!
//! let mut callbacks = CallbackList::new();
//! callbacks.add(EpochNotifyCallback::new(augment.clone()));
//!
//! let mut ctx = CallbackContext::new(4);
//! for epoch in 0..4 {
//!     ctx.epoch = epoch;
//!     callbacks.before_epoch(&mut ctx).unwrap();
//!     let img = Image::filled((16, 16, 3), 0.0_f32).unwrap();
//!     augment.apply(img, Split::Train).unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod callback;
pub mod error;
pub mod shared;

pub use callback::{Callback, CallbackContext, CallbackList, EpochNotifyCallback};
pub use error::{Result, TrainError};
pub use shared::{EpochAware, SharedTransform};
