//! Pixel interpolation methods for image transformations.
//!
//! This module provides the interpolation algorithms used when resampling
//! images during geometric warping.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Lanczos**: Windowed-sinc interpolation over an 8x8 support, the
//!   highest quality kernel offered here

mod bilinear;
mod lanczos;
mod nearest;

/// Grid generation utilities for image warping.
pub mod grid;

pub(crate) mod interpolate;

pub use interpolate::{interpolate_pixel, InterpolationMode};
