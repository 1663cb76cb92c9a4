//! # coocop
//!
//! Copyout and CopyPairing data augmentation for neural-network training.
//!
//! - **Copyout** overwrites a random square of each training image with
//!   the pixels of an image seen earlier.
//! - **CopyPairing** starts and ends training with Copyout and, in between,
//!   alternates Copyout with SamplePairing (averaging with an earlier image).
//!
//! Both keep a bounded, randomly evicted history of past images.
//!
//! ## Quick Start
//!
//! ```rust
//! use coocop::prelude::*;
//!
//! let config = CopyPairingConfig::new(16, 5, 40, 2, 1).with_image_buffer_size(64);
//! let mut cop = CopyPairing::<f32>::new(config)?.with_seed(Seed::new(42));
//!
//! for epoch in 0..40 {
//!     cop.advance_epoch(epoch);
//!     let image = Image::filled((32, 32, 3), 0.5)?;
//!     let augmented = cop.apply(image, Split::Train)?;
//!     assert_eq!(augmented.shape(), ImageShape::new(32, 32, 3));
//! }
//! # Ok::<(), coocop::core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use coocop_core as core;
pub use coocop_train as train;
pub use coocop_transforms as transforms;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use coocop_core::{
        Compose, CoreError, Identity, Image, ImageShape, Pixel, Result, Seed, Split, Transform,
    };

    // Transforms
    pub use coocop_transforms::{
        Augmentation, CopyPairing, CopyPairingConfig, CopyPairingPhase, Copyout, CopyoutConfig,
    };

    // Training
    pub use coocop_train::{
        Callback, CallbackContext, CallbackList, EpochAware, EpochNotifyCallback, SharedTransform,
    };
}
