use rayon::prelude::*;

use detaug_image::Image;

/// Apply a function to each pixel of `src`, writing the result into `dst`.
///
/// Rows are processed in parallel, pixels within a row sequentially.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C1).
/// * `dst` - The output image with shape (H, W, C2), same H and W as `src`.
/// * `f` - The function receiving one source pixel and one destination pixel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize, F>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: F,
) where
    T1: Copy + Send + Sync,
    T2: Copy + Send,
    F: Fn(&[T1], &mut [T2]) + Send + Sync,
{
    let src_cols = src.cols();
    let dst_cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C2)
        .zip_eq(src.as_slice().par_chunks_exact(src_cols * C1))
        .for_each(|(dst_row, src_row)| {
            dst_row
                .chunks_exact_mut(C2)
                .zip(src_row.chunks_exact(C1))
                .for_each(|(dst_pixel, src_pixel)| f(src_pixel, dst_pixel));
        });
}

/// Apply a resampling function to each pixel of `dst` given per-pixel source
/// coordinates `map_x` and `map_y`.
///
/// Rows are processed in parallel, pixels within a row sequentially.
///
/// # Arguments
///
/// * `dst` - The output image with shape (H, W, C).
/// * `map_x` - The x source coordinate for each output pixel, length H * W.
/// * `map_y` - The y source coordinate for each output pixel, length H * W.
/// * `f` - The function receiving the coordinates and the destination pixel.
pub fn par_iter_rows_resample<T, const C: usize, F>(
    dst: &mut Image<T, C>,
    map_x: &[f32],
    map_y: &[f32],
    f: F,
) where
    T: Copy + Send,
    F: Fn(&f32, &f32, &mut [T]) + Send + Sync,
{
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .zip_eq(map_x.par_chunks_exact(cols))
        .zip_eq(map_y.par_chunks_exact(cols))
        .for_each(|((dst_row, x_row), y_row)| {
            dst_row
                .chunks_exact_mut(C)
                .zip(x_row.iter().zip(y_row.iter()))
                .for_each(|(dst_pixel, (x, y))| f(x, y, dst_pixel));
        });
}

#[cfg(test)]
mod tests {
    use detaug_image::{Image, ImageError, ImageSize};

    #[test]
    fn par_iter_rows_copy() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![1, 2, 3, 4],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::par_iter_rows(&src, &mut dst, |src_pixel, dst_pixel| {
            dst_pixel[0] = src_pixel[0] + 1;
        });

        assert_eq!(dst.as_slice(), &[2, 3, 4, 5]);

        Ok(())
    }

    #[test]
    fn par_iter_rows_resample_coords() -> Result<(), ImageError> {
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        let map_x = vec![0.0, 1.0, 0.0, 1.0];
        let map_y = vec![0.0, 0.0, 1.0, 1.0];

        super::par_iter_rows_resample(&mut dst, &map_x, &map_y, |&x, &y, dst_pixel| {
            dst_pixel[0] = x + 10.0 * y;
        });

        assert_eq!(dst.as_slice(), &[0.0, 1.0, 10.0, 11.0]);

        Ok(())
    }
}
