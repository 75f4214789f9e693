use detaug_image::ImageError;

/// An error type for the augmentation module.
#[derive(thiserror::Error, Debug)]
pub enum AugmentError {
    /// Error when an effect is constructed with inverted bounds.
    #[error("Lower bound ({0}) must not exceed upper bound ({1})")]
    InvalidBounds(f64, f64),

    /// Error when a probability is outside the unit interval.
    #[error("Probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    /// Error when a translation limit is negative.
    #[error("Translation limits must be non-negative, got ({0}, {1})")]
    InvalidShift(i32, i32),

    /// Error from the underlying image operations.
    #[error(transparent)]
    Image(#[from] ImageError),
}
