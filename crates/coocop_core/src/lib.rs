//! # coocop_core
//!
//! Core types and traits for Copyout / CopyPairing augmentation.
//!
//! This crate provides:
//! - [`Image`] dense `(H, W, C)` buffers with region copy and mean blending
//! - [`Pixel`] for the element types an image can hold
//! - [`Seed`] for deterministic random number generation
//! - [`Transform`] trait for stateful augmentation
//! - Error types and common utilities
//!
//! ## Shape Convention
//!
//! Images follow the convention `(H, W, C)`:
//! - `H`: Height (rows)
//! - `W`: Width (columns)
//! - `C`: Channels
//!
//! ## Example
//!
//! ```rust
//! use coocop_core::{Image, ImageShape, Seed};
//!
//! let seed = Seed::new(42);
//! let image = Image::filled(ImageShape::new(32, 32, 3), 0.0_f32).unwrap();
//! assert_eq!(image.height(), 32);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod image;
mod pixel;
mod seed;
mod shape;
mod split;
mod transform;

pub use error::{CoreError, Result};
pub use image::Image;
pub use pixel::Pixel;
pub use seed::Seed;
pub use shape::ImageShape;
pub use split::Split;
pub use transform::{Compose, Identity, Transform};
