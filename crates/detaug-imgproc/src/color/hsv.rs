use detaug_image::{Image, ImageError};

use crate::parallel;

/// Convert an RGB image to an HSV image.
///
/// The input image is assumed to have 3 channels in the order R, G, B.
///
/// The 8-bit convention of OpenCV is used for the output channels:
///
/// * H: The hue channel in the range [0, 180) (half degrees).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// # Arguments
///
/// * `src` - The input RGB image assumed to have 3 channels.
/// * `dst` - The output HSV image.
///
/// # Example
///
/// ```
/// use detaug_image::{Image, ImageSize};
/// use detaug_imgproc::color::hsv_from_rgb;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut hsv = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// hsv_from_rgb(&image, &mut hsv).unwrap();
///
/// assert_eq!(hsv.num_channels(), 3);
/// assert_eq!(hsv.size().width, 4);
/// assert_eq!(hsv.size().height, 5);
/// ```
pub fn hsv_from_rgb(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f32;
        let g = src_pixel[1] as f32;
        let b = src_pixel[2] as f32;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        // ensure h is in the range [0, 360), then store as half degrees
        let h = if h < 0.0 { h + 360.0 } else { h };
        let h = (h / 2.0).round() as u32 % 180;

        let s = if max == 0.0 {
            0.0
        } else {
            (delta / max) * 255.0
        };

        dst_pixel[0] = h as u8;
        dst_pixel[1] = s.round() as u8;
        dst_pixel[2] = max as u8;
    });

    Ok(())
}

/// Convert an HSV image to an RGB image.
///
/// The input is expected in the 8-bit OpenCV convention produced by
/// [`hsv_from_rgb`]: H in [0, 180) half degrees, S and V in [0, 255].
///
/// # Arguments
///
/// * `src` - The input HSV image assumed to have 3 channels.
/// * `dst` - The output RGB image.
pub fn rgb_from_hsv(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let h = src_pixel[0] as f32 * 2.0;
        let s = src_pixel[1] as f32 / 255.0;
        let v = src_pixel[2] as f32 / 255.0;

        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        dst_pixel[0] = ((r + m) * 255.0).round() as u8;
        dst_pixel[1] = ((g + m) * 255.0).round() as u8;
        dst_pixel[2] = ((b + m) * 255.0).round() as u8;
    });

    Ok(())
}
