//! Randomized augmentation effects.
//!
//! Every effect shares one contract: consume an image and its target, draw
//! the effect's parameter from the supplied random source and return the
//! transformed pair. Configuration is immutable after construction, so an
//! effect can be applied concurrently across different samples, one random
//! source per worker.

use detaug_image::Image;
use rand::RngCore;

use crate::error::AugmentError;
use crate::target::Target;

mod color;
mod flip;
mod rotate;
mod scale;
mod shear;
mod translate;

pub use color::{Clahe, HistogramEqualize, RandomBrightness, RandomHue, RandomSaturation};
pub use flip::{FlipAxis, RandomFlip};
pub use rotate::RandomRotate;
pub use scale::RandomScale;
pub use shear::{RandomShearX, RandomShearY};
pub use translate::RandomTranslate;

/// The three-point source triangle every correspondence starts from.
pub(crate) const SRC_TRIANGLE: [[f32; 2]; 3] = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]];

/// A randomized transformation of an image and its ground truth.
pub trait Effect: Send + Sync {
    /// Apply the effect to one sample.
    ///
    /// The image and target are consumed and a new pair is returned; the
    /// non-box part of the target always passes through unmodified.
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError>;
}

/// A sequential pipeline of effects sharing one random source.
///
/// Each effect receives the previous effect's output, so image dimensions
/// are re-read at every step.
///
/// # Example
///
/// ```
/// use detaug::effects::{Compose, Effect, RandomFlip, RandomRotate};
/// use detaug::{BoundingBox, Target};
/// use detaug_image::{Image, ImageSize};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let pipeline = Compose::new(vec![
///     Box::new(RandomFlip::horizontal(0.5).unwrap()),
///     Box::new(RandomRotate::new(-10, 10).unwrap()),
/// ]);
///
/// let image = Image::from_size_val(ImageSize { width: 64, height: 48 }, 0u8).unwrap();
/// let target = Target::new(vec![BoundingBox::new(10, 10, 30, 30)]);
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let (image, target) = pipeline.apply(image, target, &mut rng).unwrap();
/// assert!(!target.boxes.is_empty());
/// ```
#[derive(Default)]
pub struct Compose {
    effects: Vec<Box<dyn Effect>>,
}

impl Compose {
    /// Create a pipeline from an ordered list of effects.
    pub fn new(effects: Vec<Box<dyn Effect>>) -> Self {
        Self { effects }
    }

    /// Append an effect to the end of the pipeline.
    pub fn push(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    /// The number of effects in the pipeline.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the pipeline contains no effects.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Effect for Compose {
    fn apply(
        &self,
        image: Image<u8, 3>,
        target: Target,
        rng: &mut dyn RngCore,
    ) -> Result<(Image<u8, 3>, Target), AugmentError> {
        let (mut image, mut target) = (image, target);
        for effect in &self.effects {
            (image, target) = effect.apply(image, target, rng)?;
        }
        Ok((image, target))
    }
}
