//! Color space conversions.

mod hsv;

pub use hsv::{hsv_from_rgb, rgb_from_hsv};
