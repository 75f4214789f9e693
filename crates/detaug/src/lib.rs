#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// axis-aligned bounding box type and corner geometry.
pub mod boxes;

/// randomized augmentation effects and pipeline composition.
pub mod effects;

/// the shared warp-and-rebox primitive.
pub mod engine;

/// error types for the augmentation module.
pub mod error;

/// ground truth container passed through the effects.
pub mod target;

pub use crate::boxes::BoundingBox;
pub use crate::error::AugmentError;
pub use crate::target::Target;
