use std::f32::consts::PI;

use detaug_image::{Image, ImageDtype, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::parallel;

/// Inverts a 2x3 affine transformation matrix.
///
/// A singular matrix inverts to the zero matrix, following OpenCV.
///
/// # Arguments
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// # Returns
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use detaug_imgproc::warp::get_rotation_matrix2d;
///
/// let center = (0.0, 0.0);
/// let angle = 90.0;
/// let scale = 1.0;
/// let rotation_matrix = get_rotation_matrix2d(center, angle, scale);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Computes the 2x3 affine matrix mapping three source points onto three
/// destination points.
///
/// Three non-collinear point pairs uniquely determine an affine transform;
/// the system is solved with Cramer's rule. Collinear source points make the
/// system singular and yield the zero matrix, following the convention of
/// [`invert_affine_transform`].
///
/// # Arguments
///
/// * `src` - The three source points.
/// * `dst` - The three destination points.
///
/// # Returns
///
/// The 2x3 affine transformation matrix mapping `src` onto `dst`.
///
/// # Example
///
/// ```
/// use detaug_imgproc::warp::get_affine_transform;
///
/// let src = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]];
/// let dst = [[2.0, 0.0], [2.0, 1.0], [3.0, 0.0]];
/// let m = get_affine_transform(&src, &dst);
///
/// assert_eq!(m, [1.0, 0.0, 2.0, 0.0, 1.0, 0.0]);
/// ```
pub fn get_affine_transform(src: &[[f32; 2]; 3], dst: &[[f32; 2]; 3]) -> [f32; 6] {
    let (x0, y0) = (src[0][0], src[0][1]);
    let (x1, y1) = (src[1][0], src[1][1]);
    let (x2, y2) = (src[2][0], src[2][1]);

    let determinant = x0 * (y1 - y2) - y0 * (x1 - x2) + (x1 * y2 - x2 * y1);
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let solve_row = |r0: f32, r1: f32, r2: f32| -> (f32, f32, f32) {
        let det_a = r0 * (y1 - y2) - y0 * (r1 - r2) + (r1 * y2 - r2 * y1);
        let det_b = x0 * (r1 - r2) - r0 * (x1 - x2) + (x1 * r2 - x2 * r1);
        let det_c = x0 * (y1 * r2 - y2 * r1) - y0 * (x1 * r2 - x2 * r1) + r0 * (x1 * y2 - x2 * y1);
        (
            det_a * inv_determinant,
            det_b * inv_determinant,
            det_c * inv_determinant,
        )
    };

    let (a, b, c) = solve_row(dst[0][0], dst[1][0], dst[2][0]);
    let (d, e, f) = solve_row(dst[0][1], dst[1][1], dst[2][1]);

    [a, b, c, d, e, f]
}

/// Applies an affine transformation to a point.
///
/// # Arguments
///
/// * `x` - The x coordinate of the point.
/// * `y` - The y coordinate of the point.
/// * `m` - The 2x3 affine transformation matrix.
///
/// # Returns
///
/// The transformed point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// Output pixels whose source position falls outside the input frame keep
/// the value `dst` was initialized with.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (height, width, channels).
/// * `m` - The 2x3 affine transformation matrix.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use detaug_image::{Image, ImageSize};
/// use detaug_imgproc::interpolation::InterpolationMode;
/// use detaug_imgproc::warp::warp_affine;
///
/// let src = Image::<u8, 3>::from_size_val(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     1u8,
/// ).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let mut dst = Image::<u8, 3>::from_size_val(src.size(), 0).unwrap();
///
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst.size().width, 4);
/// assert_eq!(dst.size().height, 5);
/// ```
pub fn warp_affine<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);

    // create meshgrid to find corresponding positions in dst from src
    let (dst_cols, dst_rows) = (dst.cols(), dst.rows());
    let (map_x, map_y) = meshgrid_from_fn(dst_cols, dst_rows, |x, y| {
        transform_point(x as f32, y as f32, &m_inv)
    });

    // apply affine transformation
    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        // check if the position is within the bounds of the src image
        if x >= 0.0f32 && x < src.cols() as f32 && y >= 0.0f32 && y < src.rows() as f32 {
            let pixel = interpolate_pixel(src, x, y, interpolation);
            dst_pixel
                .iter_mut()
                .zip(pixel.iter())
                .for_each(|(dst_value, &value)| *dst_value = T::from_f32(value));
        }
    });

    Ok(())
}
