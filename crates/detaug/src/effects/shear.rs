use detaug_image::Image;
use detaug_imgproc::warp::get_affine_transform;
use rand::{Rng, RngCore};

use crate::effects::{Effect, SRC_TRIANGLE};
use crate::engine::warp_affine_with_boxes;
use crate::error::AugmentError;
use crate::target::Target;

fn check_bounds(min_angle: i32, max_angle: i32) -> Result<(), AugmentError> {
    if min_angle > max_angle {
        return Err(AugmentError::InvalidBounds(
            min_angle as f64,
            max_angle as f64,
        ));
    }
    Ok(())
}

/// Shear an image and its boxes along the x axis by an angle drawn
/// uniformly from a degree range.
///
/// The x offset of a point is proportional to its y coordinate; a positive
/// angle skews from the bottom edge, a negative one from the top. The
/// destination is rescaled so the sheared content shrinks to fit the frame
/// instead of being cropped by it.
#[derive(Clone, Debug)]
pub struct RandomShearX {
    min_angle: i32,
    max_angle: i32,
}

impl RandomShearX {
    /// Create a shear effect drawing signed integer degrees from
    /// `[min_angle, max_angle]`.
    ///
    /// # Errors
    ///
    /// Fails if `min_angle > max_angle`.
    pub fn new(min_angle: i32, max_angle: i32) -> Result<Self, AugmentError> {
        check_bounds(min_angle, max_angle)?;
        Ok(Self {
            min_angle,
            max_angle,
        })
    }
}

impl Effect for RandomShearX {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let size = image.size();
        let (w, h) = (size.width as f32, size.height as f32);

        let angle = rng.random_range(self.min_angle..=self.max_angle);
        let tan = (angle.abs() as f32).to_radians().tan();
        let shear_x = tan * w;

        let src = SRC_TRIANGLE;
        let mut dst = src;
        for point in dst.iter_mut() {
            if angle >= 0 {
                point[0] += shear_x / h * (h - point[1]);
            } else {
                point[0] += shear_x / h * point[1];
            }
            point[0] *= w / (w + h * tan);
        }

        let m = get_affine_transform(&src, &dst);
        let mut target = target;
        let (image, boxes) = warp_affine_with_boxes(image, target.boxes, &m, size)?;
        target.boxes = boxes;
        Ok((image, target))
    }
}

/// Shear an image and its boxes along the y axis by an angle drawn
/// uniformly from a degree range.
///
/// The y offset of a point is proportional to its x coordinate; a positive
/// angle skews from the right edge, a negative one from the left. The
/// destination is rescaled so the sheared content shrinks to fit the frame
/// instead of being cropped by it.
#[derive(Clone, Debug)]
pub struct RandomShearY {
    min_angle: i32,
    max_angle: i32,
}

impl RandomShearY {
    /// Create a shear effect drawing signed integer degrees from
    /// `[min_angle, max_angle]`.
    ///
    /// # Errors
    ///
    /// Fails if `min_angle > max_angle`.
    pub fn new(min_angle: i32, max_angle: i32) -> Result<Self, AugmentError> {
        check_bounds(min_angle, max_angle)?;
        Ok(Self {
            min_angle,
            max_angle,
        })
    }
}

impl Effect for RandomShearY {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let size = image.size();
        let (w, h) = (size.width as f32, size.height as f32);

        let angle = rng.random_range(self.min_angle..=self.max_angle);
        let tan = (angle.abs() as f32).to_radians().tan();
        let shear_y = tan * h;

        let src = SRC_TRIANGLE;
        let mut dst = src;
        for point in dst.iter_mut() {
            if angle >= 0 {
                point[1] += shear_y / w * (w - point[0]);
            } else {
                point[1] += shear_y / w * point[0];
            }
            point[1] *= h / (h + w * tan);
        }

        let m = get_affine_transform(&src, &dst);
        let mut target = target;
        let (image, boxes) = warp_affine_with_boxes(image, target.boxes, &m, size)?;
        target.boxes = boxes;
        Ok((image, target))
    }
}

#[cfg(test)]
mod tests {
    use detaug_image::{Image, ImageSize};
    use rand::{rngs::StdRng, SeedableRng};

    use super::{RandomShearX, RandomShearY};
    use crate::boxes::BoundingBox;
    use crate::effects::Effect;
    use crate::error::AugmentError;
    use crate::target::Target;

    fn sample() -> (Image<u8, 3>, Target) {
        let image = Image::from_size_val(
            ImageSize {
                width: 100,
                height: 100,
            },
            50u8,
        )
        .unwrap();
        let target = Target::new(vec![BoundingBox::new(40, 40, 60, 60)]);
        (image, target)
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert!(RandomShearX::new(10, -10).is_err());
        assert!(RandomShearY::new(10, -10).is_err());
        assert!(RandomShearX::new(-10, 10).is_ok());
    }

    #[test]
    fn zero_angle_is_identity_on_boxes() -> Result<(), AugmentError> {
        let (image, target) = sample();
        let effect = RandomShearX::new(0, 0)?;

        let mut rng = StdRng::seed_from_u64(1);
        let (_, out_target) = effect.apply(image, target.clone(), &mut rng)?;

        assert_eq!(out_target.boxes, target.boxes);

        Ok(())
    }

    #[test]
    fn positive_x_shear_skews_from_the_bottom() -> Result<(), AugmentError> {
        let (image, _) = sample();
        let target = Target::new(vec![BoundingBox::new(11, 70, 51, 90)]);
        let effect = RandomShearX::new(45, 45)?;

        let mut rng = StdRng::seed_from_u64(1);
        let (_, out_target) = effect.apply(image, target, &mut rng)?;

        // tan 45 = 1 on a square frame: x' = (x - y + 100) / 2, y' = y;
        // the half-pixel corners truncate down
        assert_eq!(out_target.boxes, vec![BoundingBox::new(10, 70, 40, 90)]);

        Ok(())
    }

    #[test]
    fn negative_x_shear_skews_from_the_top() -> Result<(), AugmentError> {
        let (image, _) = sample();
        let target = Target::new(vec![BoundingBox::new(11, 70, 51, 90)]);
        let effect = RandomShearX::new(-45, -45)?;

        let mut rng = StdRng::seed_from_u64(1);
        let (_, out_target) = effect.apply(image, target, &mut rng)?;

        // tan 45 = 1 on a square frame: x' = (x + y) / 2, y' = y
        assert_eq!(out_target.boxes, vec![BoundingBox::new(40, 70, 70, 90)]);

        Ok(())
    }

    #[test]
    fn positive_y_shear_mirrors_the_x_variant() -> Result<(), AugmentError> {
        let (image, _) = sample();
        let target = Target::new(vec![BoundingBox::new(70, 11, 90, 51)]);
        let effect = RandomShearY::new(45, 45)?;

        let mut rng = StdRng::seed_from_u64(1);
        let (_, out_target) = effect.apply(image, target, &mut rng)?;

        // tan 45 = 1 on a square frame: y' = (y - x + 100) / 2, x' = x
        assert_eq!(out_target.boxes, vec![BoundingBox::new(70, 10, 90, 40)]);

        Ok(())
    }
}
