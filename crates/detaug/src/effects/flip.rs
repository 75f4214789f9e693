use detaug_image::Image;
use detaug_imgproc::warp::get_affine_transform;
use rand::{Rng, RngCore};

use crate::effects::{Effect, SRC_TRIANGLE};
use crate::engine::warp_affine_with_boxes;
use crate::error::AugmentError;
use crate::target::Target;

/// The axis a [`RandomFlip`] mirrors about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror left-right.
    Horizontal,
    /// Mirror top-bottom.
    Vertical,
}

/// Flip an image and its boxes with a given probability.
///
/// The only probability-gated effect: a failed draw passes the sample
/// through unchanged.
#[derive(Clone, Debug)]
pub struct RandomFlip {
    prob: f64,
    axis: FlipAxis,
}

impl RandomFlip {
    /// Create a flip effect with the given probability and axis.
    ///
    /// # Errors
    ///
    /// Fails if `prob` is outside `[0, 1]`.
    pub fn new(prob: f64, axis: FlipAxis) -> Result<Self, AugmentError> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(AugmentError::InvalidProbability(prob));
        }
        Ok(Self { prob, axis })
    }

    /// A left-right flip with the given probability.
    pub fn horizontal(prob: f64) -> Result<Self, AugmentError> {
        Self::new(prob, FlipAxis::Horizontal)
    }

    /// A top-bottom flip with the given probability.
    pub fn vertical(prob: f64) -> Result<Self, AugmentError> {
        Self::new(prob, FlipAxis::Vertical)
    }
}

impl Effect for RandomFlip {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        if !rng.random_bool(self.prob) {
            return Ok((image, target));
        }

        let size = image.size();
        let (w, h) = (size.width as f32, size.height as f32);

        let src = SRC_TRIANGLE;
        let mut dst = src;
        match self.axis {
            FlipAxis::Horizontal => {
                for point in dst.iter_mut() {
                    point[0] = w - point[0];
                }
            }
            FlipAxis::Vertical => {
                for point in dst.iter_mut() {
                    point[1] = h - point[1];
                }
            }
        }

        let m = get_affine_transform(&src, &dst);
        let mut target = target;
        let (image, boxes) = warp_affine_with_boxes(image, target.boxes, &m, size)?;
        target.boxes = boxes;
        Ok((image, target))
    }
}
