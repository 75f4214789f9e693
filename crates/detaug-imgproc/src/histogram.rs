use detaug_image::{Image, ImageError};
use rayon::prelude::*;

/// Compute the pixel intensity histogram of an image.
///
/// NOTE: this is limited to 8-bit 1-channel images.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
/// * `hist` - The output histogram, one slot per bin.
/// * `num_bins` - The number of bins to use for the histogram.
///
/// # Errors
///
/// Returns an error if the number of bins is invalid.
///
/// # Example
///
/// ```
/// use detaug_image::{Image, ImageSize};
/// use detaug_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 3,
///     height: 3,
///   },
///   vec![0, 2, 4, 128, 130, 132, 254, 255, 255],
/// ).unwrap();
///
/// let mut histogram = vec![0; 3];
///
/// compute_histogram(&image, &mut histogram, 3).unwrap();
/// assert_eq!(histogram, vec![3, 3, 3]);
/// ```
pub fn compute_histogram(
    src: &Image<u8, 1>,
    hist: &mut [usize],
    num_bins: usize,
) -> Result<(), ImageError> {
    if num_bins == 0 || num_bins > 256 || hist.len() != num_bins {
        return Err(ImageError::InvalidHistogramBins(num_bins));
    }

    let counts = src
        .as_slice()
        .par_chunks(4096)
        .fold(
            || vec![0usize; num_bins],
            |mut local, chunk| {
                for &px in chunk {
                    local[(px as usize * num_bins) >> 8] += 1;
                }
                local
            },
        )
        .reduce(
            || vec![0usize; num_bins],
            |mut a, b| {
                for (slot, count) in a.iter_mut().zip(b.iter()) {
                    *slot += count;
                }
                a
            },
        );

    for (slot, count) in hist.iter_mut().zip(counts.iter()) {
        *slot += count;
    }

    Ok(())
}

/// Equalize the histogram of an 8-bit single channel image.
///
/// The cumulative distribution of the input is stretched so the output
/// occupies the full [0, 255] range. A constant image is returned unchanged.
///
/// # Arguments
///
/// * `src` - The input image to equalize.
/// * `dst` - The output equalized image.
pub fn equalize_hist(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut hist = vec![0usize; 256];
    compute_histogram(src, &mut hist, 256)?;

    let mut cdf = [0usize; 256];
    let mut acc = 0;
    for (slot, &count) in cdf.iter_mut().zip(hist.iter()) {
        acc += count;
        *slot = acc;
    }

    let total = src.cols() * src.rows();
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    let denom = total - cdf_min;

    // single intensity level, nothing to stretch
    if denom == 0 {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let mut lut = [0u8; 256];
    for (slot, &c) in lut.iter_mut().zip(cdf.iter()) {
        let scaled = (c.saturating_sub(cdf_min)) as f32 / denom as f32 * 255.0;
        *slot = scaled.round() as u8;
    }

    dst.as_slice_mut()
        .par_iter_mut()
        .zip_eq(src.as_slice().par_iter())
        .for_each(|(dst_px, &src_px)| *dst_px = lut[src_px as usize]);

    Ok(())
}

/// Contrast limited adaptive histogram equalization of an 8-bit single
/// channel image.
///
/// The image is divided into a grid of tiles; each tile gets its own
/// clip-limited equalization lookup table and every pixel blends the tables
/// of its four nearest tiles bilinearly, which avoids visible tile seams.
///
/// # Arguments
///
/// * `src` - The input image to equalize.
/// * `dst` - The output equalized image.
/// * `clip_limit` - Contrast limit relative to the uniform bin occupancy,
///   OpenCV convention. Common values are in the 2.0 - 4.0 range.
/// * `grid_size` - The number of tiles as (columns, rows).
pub fn equalize_clahe(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    clip_limit: f32,
    grid_size: (usize, usize),
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if clip_limit <= 0.0 {
        return Err(ImageError::InvalidClipLimit(clip_limit));
    }

    let (cols, rows) = (src.cols(), src.rows());
    let (grid_w, grid_h) = grid_size;
    if grid_w == 0 || grid_h == 0 || grid_w > cols || grid_h > rows {
        return Err(ImageError::InvalidTileGrid(grid_w, grid_h));
    }

    let data = src.as_slice();

    // tile boundaries via integer splitting so remainders spread evenly
    let tile_x = |t: usize| t * cols / grid_w;
    let tile_y = |t: usize| t * rows / grid_h;

    // one clip-limited lookup table per tile
    let luts: Vec<[u8; 256]> = (0..grid_w * grid_h)
        .into_par_iter()
        .map(|tile| {
            let (tx, ty) = (tile % grid_w, tile / grid_w);
            let (x0, x1) = (tile_x(tx), tile_x(tx + 1));
            let (y0, y1) = (tile_y(ty), tile_y(ty + 1));
            let area = (x1 - x0) * (y1 - y0);

            let mut hist = [0usize; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[data[y * cols + x] as usize] += 1;
                }
            }

            // clip the histogram and redistribute the excess uniformly
            let clip_abs = ((clip_limit * area as f32 / 256.0) as usize).max(1);
            let mut excess = 0usize;
            for count in hist.iter_mut() {
                if *count > clip_abs {
                    excess += *count - clip_abs;
                    *count = clip_abs;
                }
            }
            let bonus = excess / 256;
            let leftover = excess % 256;
            for (i, count) in hist.iter_mut().enumerate() {
                *count += bonus + usize::from(i < leftover);
            }

            let mut lut = [0u8; 256];
            let mut acc = 0usize;
            for (slot, &count) in lut.iter_mut().zip(hist.iter()) {
                acc += count;
                *slot = ((acc as f32 * 255.0 / area as f32).round()).min(255.0) as u8;
            }
            lut
        })
        .collect();

    // blend the four nearest tile tables per pixel
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let gy = (y as f32 + 0.5) * grid_h as f32 / rows as f32 - 0.5;
            let fy = gy - gy.floor();
            let y0 = (gy.floor() as i64).clamp(0, grid_h as i64 - 1) as usize;
            let y1 = (gy.floor() as i64 + 1).clamp(0, grid_h as i64 - 1) as usize;

            for (x, dst_px) in dst_row.iter_mut().enumerate() {
                let gx = (x as f32 + 0.5) * grid_w as f32 / cols as f32 - 0.5;
                let fx = gx - gx.floor();
                let x0 = (gx.floor() as i64).clamp(0, grid_w as i64 - 1) as usize;
                let x1 = (gx.floor() as i64 + 1).clamp(0, grid_w as i64 - 1) as usize;

                let v = data[y * cols + x] as usize;
                let top = luts[y0 * grid_w + x0][v] as f32 * (1.0 - fx)
                    + luts[y0 * grid_w + x1][v] as f32 * fx;
                let bottom = luts[y1 * grid_w + x0][v] as f32 * (1.0 - fx)
                    + luts[y1 * grid_w + x1][v] as f32 * fx;

                *dst_px = (top * (1.0 - fy) + bottom * fy).round() as u8;
            }
        });

    Ok(())
}
