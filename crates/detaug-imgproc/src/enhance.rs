use detaug_image::{Image, ImageError};
use rayon::prelude::*;

use crate::color::{hsv_from_rgb, rgb_from_hsv};

fn check_same_size(src: &Image<u8, 3>, dst: &Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Scale one HSV channel of an RGB image by a factor, saturating to [0, 255].
fn adjust_hsv_channel(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    channel: usize,
    factor: f32,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    let mut hsv = Image::from_size_val(src.size(), 0)?;
    hsv_from_rgb(src, &mut hsv)?;

    hsv.as_slice_mut().par_chunks_exact_mut(3).for_each(|pixel| {
        pixel[channel] = (pixel[channel] as f32 * factor).round().clamp(0.0, 255.0) as u8;
    });

    rgb_from_hsv(&hsv, dst)
}

/// Adjust the brightness of an RGB image.
///
/// The value channel of the HSV representation is scaled by `factor` and
/// saturated to the valid 8-bit range.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `factor` - The multiplicative brightness factor, 1.0 is a no-op.
///
/// # Example
///
/// ```
/// use detaug_image::{Image, ImageSize};
/// use detaug_imgproc::enhance::adjust_brightness;
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     100u8,
/// ).unwrap();
///
/// let mut dst = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// adjust_brightness(&image, &mut dst, 1.0).unwrap();
/// ```
pub fn adjust_brightness(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    factor: f32,
) -> Result<(), ImageError> {
    adjust_hsv_channel(src, dst, 2, factor)
}

/// Adjust the saturation of an RGB image.
///
/// The saturation channel of the HSV representation is scaled by `factor`
/// and saturated to the valid 8-bit range.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `factor` - The multiplicative saturation factor, 1.0 is a no-op.
pub fn adjust_saturation(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    factor: f32,
) -> Result<(), ImageError> {
    adjust_hsv_channel(src, dst, 1, factor)
}

/// Rotate the hue of an RGB image.
///
/// The hue channel of the HSV representation is shifted by `delta` half
/// degrees and wrapped modulo 180, the 8-bit hue period.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image.
/// * `delta` - The additive hue shift in half degrees, may be negative.
pub fn adjust_hue(src: &Image<u8, 3>, dst: &mut Image<u8, 3>, delta: i32) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    let mut hsv = Image::from_size_val(src.size(), 0)?;
    hsv_from_rgb(src, &mut hsv)?;

    hsv.as_slice_mut().par_chunks_exact_mut(3).for_each(|pixel| {
        pixel[0] = (pixel[0] as i32 + delta).rem_euclid(180) as u8;
    });

    rgb_from_hsv(&hsv, dst)
}

#[cfg(test)]
mod tests {
    use detaug_image::{Image, ImageError, ImageSize};

    fn test_image() -> Result<Image<u8, 3>, ImageError> {
        Image::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![200, 120, 40, 10, 20, 30],
        )
    }

    #[test]
    fn brightness_identity() -> Result<(), ImageError> {
        let image = test_image()?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::adjust_brightness(&image, &mut dst, 1.0)?;

        // a unit factor only pays the hsv roundtrip rounding cost
        for (&got, &expected) in dst.as_slice().iter().zip(image.as_slice().iter()) {
            assert!((got as i32 - expected as i32).abs() <= 3);
        }

        Ok(())
    }

    #[test]
    fn brightness_darkens() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            200,
        )?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::adjust_brightness(&image, &mut dst, 0.5)?;

        for &value in dst.as_slice() {
            assert_eq!(value, 100);
        }

        Ok(())
    }

    #[test]
    fn brightness_saturates() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 1,
                height: 1,
            },
            200,
        )?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::adjust_brightness(&image, &mut dst, 10.0)?;

        for &value in dst.as_slice() {
            assert_eq!(value, 255);
        }

        Ok(())
    }

    #[test]
    fn saturation_zero_makes_gray() -> Result<(), ImageError> {
        let image = test_image()?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::adjust_saturation(&image, &mut dst, 0.0)?;

        for pixel in dst.as_slice().chunks_exact(3) {
            assert_eq!(pixel[0], pixel[1]);
            assert_eq!(pixel[1], pixel[2]);
        }

        Ok(())
    }

    #[test]
    fn hue_full_period_is_identity() -> Result<(), ImageError> {
        let image = test_image()?;
        let mut dst = Image::from_size_val(image.size(), 0)?;
        super::adjust_hue(&image, &mut dst, 180)?;

        for (&got, &expected) in dst.as_slice().iter().zip(image.as_slice().iter()) {
            assert!((got as i32 - expected as i32).abs() <= 3);
        }

        Ok(())
    }
}
