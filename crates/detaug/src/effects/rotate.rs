use detaug_image::Image;
use detaug_imgproc::warp::get_rotation_matrix2d;
use rand::{Rng, RngCore};

use crate::effects::Effect;
use crate::engine::warp_affine_with_boxes;
use crate::error::AugmentError;
use crate::target::Target;

/// Rotate an image and its boxes about the image center by an angle drawn
/// uniformly from a degree range.
#[derive(Clone, Debug)]
pub struct RandomRotate {
    min_angle: i32,
    max_angle: i32,
}

impl RandomRotate {
    /// Create a rotation effect drawing integer degrees from
    /// `[min_angle, max_angle]`.
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

impl Effect for RandomRotate {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let size = image.size();
        let center = (size.width as f32 / 2.0, size.height as f32 / 2.0);

        let angle = rng.random_range(self.min_angle..=self.max_angle);
        let m = get_rotation_matrix2d(center, angle as f32, 1.0);

        let mut target = target;
        let (image, boxes) = warp_affine_with_boxes(image, target.boxes, &m, size)?;
        target.boxes = boxes;
        Ok((image, target))
    }
}
