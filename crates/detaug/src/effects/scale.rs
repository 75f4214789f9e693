use detaug_image::Image;
use detaug_imgproc::warp::get_affine_transform;
use rand::{Rng, RngCore};

use crate::effects::{Effect, SRC_TRIANGLE};
use crate::engine::warp_affine_with_boxes;
use crate::error::AugmentError;
use crate::target::Target;

/// Scale an image and its boxes about the image center by a ratio drawn
/// uniformly from a range.
#[derive(Clone, Debug)]
pub struct RandomScale {
    min_ratio: f32,
    max_ratio: f32,
}

impl RandomScale {
    /// Create a scale effect drawing the ratio from `[min_ratio, max_ratio]`.
    ///
    /// # Errors
    ///
    /// Fails if `min_ratio > max_ratio`.
    pub fn new(min_ratio: f32, max_ratio: f32) -> Result<Self, AugmentError> {
        if min_ratio > max_ratio {
            return Err(AugmentError::InvalidBounds(
                min_ratio as f64,
                max_ratio as f64,
            ));
        }
        Ok(Self {
            min_ratio,
            max_ratio,
        })
    }
}

impl Effect for RandomScale {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let size = image.size();
        let (w, h) = (size.width as f32, size.height as f32);

        let ratio = rng.random_range(self.min_ratio..=self.max_ratio);

        // scale the unit triangle, then re-center so the fixed point of the
        // scaling is the image center
        let diff = [w / 2.0 * (ratio - 1.0), h / 2.0 * (ratio - 1.0)];
        let src = SRC_TRIANGLE;
        let mut dst = src;
        for point in dst.iter_mut() {
            point[0] = point[0] * ratio - diff[0];
            point[1] = point[1] * ratio - diff[1];
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

    use super::RandomScale;
    use crate::boxes::BoundingBox;
    use crate::effects::Effect;
    use crate::error::AugmentError;
    use crate::target::Target;

    fn sample(width: usize, height: usize) -> (Image<u8, 3>, Target) {
        let image = Image::from_size_val(ImageSize { width, height }, 50u8).unwrap();
        let target = Target::new(vec![BoundingBox::new(40, 40, 60, 60)]);
        (image, target)
    }

    #[test]
    fn invalid_bounds_are_rejected() {
        assert!(RandomScale::new(1.1, 0.9).is_err());
        assert!(RandomScale::new(0.9, 1.1).is_ok());
    }

    #[test]
    fn unit_ratio_is_identity_on_boxes() -> Result<(), AugmentError> {
        let (image, target) = sample(100, 100);
        let effect = RandomScale::new(1.0, 1.0)?;

        let mut rng = StdRng::seed_from_u64(1);
        let (_, out_target) = effect.apply(image, target.clone(), &mut rng)?;

        assert_eq!(out_target.boxes, target.boxes);

        Ok(())
    }

    #[test]
    fn half_ratio_shrinks_about_center() -> Result<(), AugmentError> {
        let (image, target) = sample(100, 100);
        let effect = RandomScale::new(0.5, 0.5)?;

        let mut rng = StdRng::seed_from_u64(1);
        let (_, out_target) = effect.apply(image, target, &mut rng)?;

        // (40, 60) maps to (45, 55) under x' = 0.5 x + 25
        assert_eq!(out_target.boxes, vec![BoundingBox::new(45, 45, 55, 55)]);

        Ok(())
    }

    #[test]
    fn zero_ratio_falls_back_to_input() -> Result<(), AugmentError> {
        let image = Image::from_size_val(
            ImageSize {
                width: 100,
                height: 100,
            },
            50u8,
        )
        .map_err(AugmentError::Image)?;
        let target = Target::new(vec![BoundingBox::new(0, 0, 1, 1)]);
        let effect = RandomScale::new(0.0, 0.0)?;

        let mut rng = StdRng::seed_from_u64(1);
        let (out, out_target) = effect.apply(image.clone(), target.clone(), &mut rng)?;

        // every corner collapses onto the center, so the whole transform is
        // rejected and the input survives untouched
        assert_eq!(out, image);
        assert_eq!(out_target.boxes, target.boxes);

        Ok(())
    }
}
