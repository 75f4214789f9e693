//! Color-space effects.
//!
//! All of these are purely pixel-valued: the target, boxes included, passes
//! through byte-identical, so they compose freely with the geometric
//! effects in one pipeline.

use detaug_image::Image;
use detaug_imgproc::color::{hsv_from_rgb, rgb_from_hsv};
use detaug_imgproc::enhance::{adjust_brightness, adjust_hue, adjust_saturation};
use detaug_imgproc::histogram::{equalize_clahe, equalize_hist};
use rand::{Rng, RngCore};

use crate::effects::Effect;
use crate::error::AugmentError;
use crate::target::Target;

fn check_bounds(min: f32, max: f32) -> Result<(), AugmentError> {
    if min > max {
        return Err(AugmentError::InvalidBounds(min as f64, max as f64));
    }
    Ok(())
}

/// Scale the brightness of an image by a factor drawn uniformly from a
/// range.
#[derive(Clone, Debug)]
pub struct RandomBrightness {
    min_delta: f32,
    max_delta: f32,
}

impl RandomBrightness {
    /// Create a brightness effect drawing the factor from
    /// `[min_delta, max_delta]`.
    ///
    /// # Errors
    ///
    /// Fails if `min_delta > max_delta`.
    pub fn new(min_delta: f32, max_delta: f32) -> Result<Self, AugmentError> {
        check_bounds(min_delta, max_delta)?;
        Ok(Self {
            min_delta,
            max_delta,
        })
    }
}

impl Default for RandomBrightness {
    fn default() -> Self {
        Self {
            min_delta: 0.9,
            max_delta: 1.1,
        }
    }
}

impl Effect for RandomBrightness {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let delta = rng.random_range(self.min_delta..=self.max_delta);
        let mut dst = Image::from_size_val(image.size(), 0u8)?;
        adjust_brightness(&image, &mut dst, delta)?;
        Ok((dst, target))
    }
}

/// Scale the saturation of an image by a factor drawn uniformly from a
/// range.
#[derive(Clone, Debug)]
pub struct RandomSaturation {
    min_delta: f32,
    max_delta: f32,
}

impl RandomSaturation {
    /// Create a saturation effect drawing the factor from
    /// `[min_delta, max_delta]`.
    ///
    /// # Errors
    ///
    /// Fails if `min_delta > max_delta`.
    pub fn new(min_delta: f32, max_delta: f32) -> Result<Self, AugmentError> {
        check_bounds(min_delta, max_delta)?;
        Ok(Self {
            min_delta,
            max_delta,
        })
    }
}

impl Default for RandomSaturation {
    fn default() -> Self {
        Self {
            min_delta: 0.95,
            max_delta: 1.05,
        }
    }
}

impl Effect for RandomSaturation {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let delta = rng.random_range(self.min_delta..=self.max_delta);
        let mut dst = Image::from_size_val(image.size(), 0u8)?;
        adjust_saturation(&image, &mut dst, delta)?;
        Ok((dst, target))
    }
}

/// Rotate the hue of an image by a shift drawn uniformly from a range of
/// half degrees.
#[derive(Clone, Debug)]
pub struct RandomHue {
    min_angle: i32,
    max_angle: i32,
}

impl RandomHue {
    /// Create a hue effect drawing the shift from `[min_angle, max_angle]`
    /// half degrees.
    ///
    /// # Errors
    ///
    /// Fails if `min_angle > max_angle`.
    pub fn new(min_angle: i32, max_angle: i32) -> Result<Self, AugmentError> {
        if min_angle > max_angle {
            return Err(AugmentError::InvalidBounds(
                min_angle as f64,
                max_angle as f64,
            ));
        }
        Ok(Self {
            min_angle,
            max_angle,
        })
    }
}

impl Default for RandomHue {
    fn default() -> Self {
        Self {
            min_angle: -9,
            max_angle: 9,
        }
    }
}

impl Effect for RandomHue {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let angle = rng.random_range(self.min_angle..=self.max_angle);
        let mut dst = Image::from_size_val(image.size(), 0u8)?;
        adjust_hue(&image, &mut dst, angle)?;
        Ok((dst, target))
    }
}

/// Equalize the value-channel histogram of an image.
///
/// Deterministic, draws nothing from the random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct HistogramEqualize;

impl HistogramEqualize {
    /// Create a histogram equalization effect.
    pub fn new() -> Self {
        Self
    }
}

impl Effect for HistogramEqualize {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        _rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let mut hsv = Image::from_size_val(image.size(), 0u8)?;
        hsv_from_rgb(&image, &mut hsv)?;

        let value = hsv.channel(2)?;
        let mut equalized = Image::from_size_val(value.size(), 0u8)?;
        equalize_hist(&value, &mut equalized)?;

        let equalized = equalized.into_vec();
        for (pixel, &v) in hsv.as_slice_mut().chunks_exact_mut(3).zip(equalized.iter()) {
            pixel[2] = v;
        }

        let mut dst = Image::from_size_val(image.size(), 0u8)?;
        rgb_from_hsv(&hsv, &mut dst)?;
        Ok((dst, target))
    }
}

/// Contrast limited adaptive histogram equalization of the value channel.
///
/// Deterministic, draws nothing from the random source.
#[derive(Clone, Debug)]
pub struct Clahe {
    clip_limit: f32,
    tile_grid: (usize, usize),
}

impl Clahe {
    /// Create a CLAHE effect with the given clip limit and tile grid.
    ///
    /// Parameter validity is checked against the image at apply time, since
    /// the tile grid has to fit the frame it is applied to.
    pub fn new(clip_limit: f32, tile_grid: (usize, usize)) -> Self {
        Self {
            clip_limit,
            tile_grid,
        }
    }
}

impl Default for Clahe {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: (8, 8),
        }
    }
}

impl Effect for Clahe {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        _rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let mut hsv = Image::from_size_val(image.size(), 0u8)?;
        hsv_from_rgb(&image, &mut hsv)?;

        let value = hsv.channel(2)?;
        let mut equalized = Image::from_size_val(value.size(), 0u8)?;
        equalize_clahe(&value, &mut equalized, self.clip_limit, self.tile_grid)?;

        let equalized = equalized.into_vec();
        for (pixel, &v) in hsv.as_slice_mut().chunks_exact_mut(3).zip(equalized.iter()) {
            pixel[2] = v;
        }

        let mut dst = Image::from_size_val(image.size(), 0u8)?;
        rgb_from_hsv(&hsv, &mut dst)?;
        Ok((dst, target))
    }
}
