use std::f32::consts::PI;

use detaug_image::{Image, ImageDtype};

/// Support radius of the windowed sinc, same as OpenCV's LANCZOS4 kernel.
const LANCZOS_A: i64 = 4;

/// Evaluate the Lanczos window at `x`.
fn lanczos_weight(x: f32) -> f32 {
    if x.abs() < f32::EPSILON {
        return 1.0;
    }
    if x.abs() >= LANCZOS_A as f32 {
        return 0.0;
    }
    let pix = PI * x;
    LANCZOS_A as f32 * pix.sin() * (pix / LANCZOS_A as f32).sin() / (pix * pix)
}

/// Kernel for Lanczos interpolation over an 8x8 support.
///
/// Taps outside the image are clamped to the border. The weights are
/// renormalized so the kernel stays a partition of unity near the edges.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn lanczos_interpolation<T, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
) -> [f32; C]
where
    T: ImageDtype,
{
    let (rows, cols) = (image.rows(), image.cols());
    let data = image.as_slice();

    let iu = u.floor() as i64;
    let iv = v.floor() as i64;

    let mut pixel = [0.0; C];
    let mut weight_sum = 0.0;

    for dy in (1 - LANCZOS_A)..=LANCZOS_A {
        let ty = iv + dy;
        let wy = lanczos_weight(v - ty as f32);
        if wy == 0.0 {
            continue;
        }
        let ty = ty.clamp(0, rows as i64 - 1) as usize;

        for dx in (1 - LANCZOS_A)..=LANCZOS_A {
            let tx = iu + dx;
            let wx = lanczos_weight(u - tx as f32);
            if wx == 0.0 {
                continue;
            }
            let tx = tx.clamp(0, cols as i64 - 1) as usize;

            let w = wx * wy;
            let base = (ty * cols + tx) * C;
            for (k, value) in pixel.iter_mut().enumerate() {
                *value += w * data[base + k].into();
            }
            weight_sum += w;
        }
    }

    if weight_sum != 0.0 {
        for value in pixel.iter_mut() {
            *value /= weight_sum;
        }
    }

    pixel
}

#[cfg(test)]
mod tests {
    use detaug_image::{Image, ImageError, ImageSize};

    #[test]
    fn lanczos_exact_at_grid_points() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 8,
                height: 8,
            },
            (0u8..64).collect(),
        )?;

        // the windowed sinc is zero at every non-center integer offset, so
        // sampling at a grid point must reproduce the pixel exactly
        let pixel = super::lanczos_interpolation(&image, 3.0, 2.0);
        assert!((pixel[0] - 19.0).abs() < 1e-3);

        Ok(())
    }

    #[test]
    fn lanczos_constant_image() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 16,
                height: 16,
            },
            7.0,
        )?;

        // renormalization keeps constant regions constant at fractional taps
        let pixel = super::lanczos_interpolation(&image, 7.3, 8.6);
        assert!((pixel[0] - 7.0).abs() < 1e-4);

        Ok(())
    }
}
