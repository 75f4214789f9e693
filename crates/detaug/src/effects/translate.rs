use detaug_image::Image;
use detaug_imgproc::warp::get_affine_transform;
use rand::{Rng, RngCore};

use crate::effects::{Effect, SRC_TRIANGLE};
use crate::engine::warp_affine_with_boxes;
use crate::error::AugmentError;
use crate::target::Target;

/// Translate an image and its boxes by a shift drawn uniformly per axis.
///
/// Each call draws an integer shift in `[-max, max]` independently for the
/// x and y axes. The [`RandomTranslate::x`] and [`RandomTranslate::y`]
/// constructors pin the unused axis to zero.
#[derive(Clone, Debug)]
pub struct RandomTranslate {
    shifts: (i32, i32),
}

impl RandomTranslate {
    /// Create a translation effect with the given maximum shift per axis.
    ///
    /// # Errors
    ///
    /// Fails if either limit is negative.
    pub fn new(shifts: (i32, i32)) -> Result<Self, AugmentError> {
        if shifts.0 < 0 || shifts.1 < 0 {
            return Err(AugmentError::InvalidShift(shifts.0, shifts.1));
        }
        Ok(Self { shifts })
    }

    /// A translation along the x axis only.
    pub fn x(shift: i32) -> Result<Self, AugmentError> {
        Self::new((shift, 0))
    }

    /// A translation along the y axis only.
    pub fn y(shift: i32) -> Result<Self, AugmentError> {
        Self::new((0, shift))
    }
}

impl Effect for RandomTranslate {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let size = image.size();

        let shift_x = rng.random_range(-self.shifts.0..=self.shifts.0);
        let shift_y = rng.random_range(-self.shifts.1..=self.shifts.1);

        let src = SRC_TRIANGLE;
        let mut dst = src;
        for point in dst.iter_mut() {
            point[0] += shift_x as f32;
            point[1] += shift_y as f32;
        }

        let m = get_affine_transform(&src, &dst);
        let mut target = target;
        let (image, boxes) = warp_affine_with_boxes(image, target.boxes, &m, size)?;
        target.boxes = boxes;
        Ok((image, target))
    }
}
