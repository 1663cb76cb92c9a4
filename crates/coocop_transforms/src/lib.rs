//! # coocop_transforms
//!
//! Copyout and CopyPairing image augmentations.
//!
//! This crate provides:
//! - [`RollingImageBuffer`], the bounded history both transforms copy from
//! - [`RegionSampler`] for placing the copied square
//! - [`Copyout`], occlusion with pixels from earlier images
//! - [`CopyPairing`], an epoch-scheduled mix of Copyout and SamplePairing
//!
//! ## Example
//!
//! ```rust
//! use coocop_core::{Image, Seed, Split, Transform};
//! use coocop_transforms::{CopyPairing, CopyPairingConfig};
//!
//! let config = CopyPairingConfig::new(16, 5, 40, 2, 1);
//! let mut transform = CopyPairing::<f32>::new(config)?.with_seed(Seed::new(42));
//!
//! for epoch in 0..3 {
//!     transform.advance_epoch(epoch);
//!     let image = Image::filled((32, 32, 3), epoch as f32)?;
//!     let out = transform.apply(image, Split::Train)?;
//!     assert_eq!(out.width(), 32);
//! }
//! # Ok::<(), coocop_core::CoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod copy_pairing;
pub mod copyout;
pub mod region;

pub use buffer::{RollingImageBuffer, DEFAULT_IMAGE_BUFFER_SIZE};
pub use copy_pairing::{
    Augmentation, CopyPairing, CopyPairingConfig, CopyPairingPhase, EpochPhaseState,
};
pub use copyout::{Copyout, CopyoutConfig};
pub use region::{Region, RegionSampler};
