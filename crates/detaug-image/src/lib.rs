#![deny(missing_docs)]
//! Image types and traits for the detaug augmentation crates.

/// image representation for detection augmentation purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
