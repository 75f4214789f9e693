use detaug_image::{Image, ImageSize};
use detaug_imgproc::interpolation::InterpolationMode;
use detaug_imgproc::warp::{transform_point, warp_affine};

use crate::boxes::{boxes_to_corners, corners_to_boxes, BoundingBox};
use crate::error::AugmentError;

/// Apply a 2x3 affine matrix to an image together with its bounding boxes.
///
/// The image is resampled with the Lanczos kernel into a fresh buffer of
/// `size`; every box is transformed through its four corners, reduced back
/// to an axis-aligned box, clipped and filtered for degenerate results.
///
/// Box coordinates clip to `[0, W]` on both axes, the width bound applies
/// to y as well. This matches the behavior the training pipelines were
/// tuned against and is pinned by tests, do not "fix" it to clip y to H.
///
/// If no box survives the clip-and-filter step the transform is rejected
/// as a whole and the untouched input image and boxes are returned, so an
/// effect never erases all ground truth.
///
/// # Arguments
///
/// * `image` - The input image.
/// * `boxes` - The bounding boxes in pixel coordinates of `image`.
/// * `m` - The 2x3 affine transformation matrix.
/// * `size` - The output frame size, also the clipping frame for boxes.
///
/// # Returns
///
/// The warped image and the surviving boxes in their input relative order,
/// or the untouched inputs when nothing survives.
pub fn warp_affine_with_boxes(
    image: Image<u8, 3>,
    boxes: Vec<BoundingBox>,
    m: &[f32; 6],
    size: ImageSize,
) -> Result<(Image<u8, 3>, Vec<BoundingBox>), AugmentError> {
    let mut warped = Image::from_size_val(size, 0u8)?;
    warp_affine(&image, &mut warped, m, InterpolationMode::Lanczos)?;

    let clip_max = size.width as i32;
    let survivors: Vec<BoundingBox> = {
        let corners = boxes_to_corners(&boxes);
        let transformed: Vec<[[f32; 2]; 4]> = corners
            .iter()
            .map(|quad| {
                let mut out = [[0.0f32; 2]; 4];
                for (dst, &[x, y, _]) in out.iter_mut().zip(quad.iter()) {
                    let (u, v) = transform_point(x, y, m);
                    *dst = [u, v];
                }
                out
            })
            .collect();

        corners_to_boxes(&transformed)
            .into_iter()
            .map(|b| BoundingBox {
                x_min: b.x_min.clamp(0, clip_max),
                y_min: b.y_min.clamp(0, clip_max),
                x_max: b.x_max.clamp(0, clip_max),
                y_max: b.y_max.clamp(0, clip_max),
            })
            .filter(|b| !b.is_degenerate())
            .collect()
    };

    if survivors.is_empty() {
        log::debug!("warp left no surviving boxes, keeping the source image and boxes");
        return Ok((image, boxes));
    }

    Ok((warped, survivors))
}

#[cfg(test)]
mod tests {
    use detaug_image::{Image, ImageSize};
    use detaug_imgproc::warp::get_rotation_matrix2d;

    use super::warp_affine_with_boxes;
    use crate::boxes::BoundingBox;
    use crate::error::AugmentError;

    fn image(width: usize, height: usize) -> Image<u8, 3> {
        let data: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        Image::new(ImageSize { width, height }, data).unwrap()
    }

    #[test]
    fn identity_keeps_boxes() -> Result<(), AugmentError> {
        let src = image(100, 100);
        let boxes = vec![BoundingBox::new(10, 10, 30, 20)];
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

        let (out, out_boxes) = warp_affine_with_boxes(src.clone(), boxes.clone(), &m, src.size())?;

        assert_eq!(out_boxes, boxes);
        assert_eq!(out.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn translation_shifts_boxes() -> Result<(), AugmentError> {
        let src = image(100, 100);
        let boxes = vec![BoundingBox::new(10, 10, 30, 20)];
        let m = [1.0, 0.0, 5.0, 0.0, 1.0, 5.0];

        let (_, out_boxes) = warp_affine_with_boxes(src.clone(), boxes, &m, src.size())?;

        assert_eq!(out_boxes, vec![BoundingBox::new(15, 15, 35, 25)]);

        Ok(())
    }

    #[test]
    fn both_axes_clip_to_width() -> Result<(), AugmentError> {
        // a frame taller than wide: y extents clamp at the width bound
        let src = image(50, 100);
        let boxes = vec![BoundingBox::new(10, 10, 40, 90)];
        let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

        let (_, out_boxes) = warp_affine_with_boxes(src.clone(), boxes, &m, src.size())?;

        assert_eq!(out_boxes, vec![BoundingBox::new(10, 10, 40, 50)]);

        Ok(())
    }

    #[test]
    fn fully_outside_box_is_dropped() -> Result<(), AugmentError> {
        let src = image(100, 100);
        let boxes = vec![
            BoundingBox::new(10, 10, 30, 20),
            BoundingBox::new(80, 80, 95, 95),
        ];
        // push everything 60 pixels right: the second box leaves the frame
        let m = [1.0, 0.0, 60.0, 0.0, 1.0, 0.0];

        let (_, out_boxes) = warp_affine_with_boxes(src.clone(), boxes, &m, src.size())?;

        assert_eq!(out_boxes, vec![BoundingBox::new(70, 10, 90, 20)]);

        Ok(())
    }

    #[test]
    fn empty_survivors_fall_back_to_input() -> Result<(), AugmentError> {
        let src = image(100, 100);
        let boxes = vec![BoundingBox::new(10, 10, 30, 20)];
        // shift the content fully out of frame
        let m = [1.0, 0.0, 200.0, 0.0, 1.0, 0.0];

        let (out, out_boxes) = warp_affine_with_boxes(src.clone(), boxes.clone(), &m, src.size())?;

        assert_eq!(out_boxes, boxes);
        assert_eq!(out.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn order_is_preserved() -> Result<(), AugmentError> {
        let src = image(100, 100);
        let boxes = vec![
            BoundingBox::new(90, 10, 99, 20),
            BoundingBox::new(10, 10, 30, 20),
            BoundingBox::new(40, 40, 60, 60),
        ];
        // shift so the first box degenerates while the others survive
        let m = [1.0, 0.0, 10.0, 0.0, 1.0, 10.0];

        let (_, out_boxes) = warp_affine_with_boxes(src.clone(), boxes, &m, src.size())?;

        assert_eq!(
            out_boxes,
            vec![
                BoundingBox::new(20, 20, 40, 30),
                BoundingBox::new(50, 50, 70, 70),
            ]
        );

        Ok(())
    }

    #[test]
    fn rotation_roundtrip_composed_within_one_pixel() -> Result<(), AugmentError> {
        // applying the forward and inverse rotation in one warp keeps the
        // single truncation of the corner reduction, so the boxes land
        // within a pixel of where they started
        let src = image(100, 100);
        let boxes = vec![BoundingBox::new(40, 40, 60, 55)];
        let center = (50.0, 50.0);

        let m = get_rotation_matrix2d(center, 7.0, 1.0);
        let m_inv = detaug_imgproc::warp::invert_affine_transform(&m);
        let composed = [
            m_inv[0] * m[0] + m_inv[1] * m[3],
            m_inv[0] * m[1] + m_inv[1] * m[4],
            m_inv[0] * m[2] + m_inv[1] * m[5] + m_inv[2],
            m_inv[3] * m[0] + m_inv[4] * m[3],
            m_inv[3] * m[1] + m_inv[4] * m[4],
            m_inv[3] * m[2] + m_inv[4] * m[5] + m_inv[5],
        ];

        let (_, out_boxes) = warp_affine_with_boxes(src.clone(), boxes.clone(), &composed, src.size())?;

        assert_eq!(out_boxes.len(), 1);
        let (out, original) = (out_boxes[0], boxes[0]);
        assert!((out.x_min - original.x_min).abs() <= 1);
        assert!((out.y_min - original.y_min).abs() <= 1);
        assert!((out.x_max - original.x_max).abs() <= 1);
        assert!((out.y_max - original.y_max).abs() <= 1);

        Ok(())
    }

    #[test]
    fn rotation_roundtrip_chained() -> Result<(), AugmentError> {
        // chaining two warps truncates the enclosure once per pass, so an
        // interior box can drift up to a pixel per pass
        let src = image(100, 100);
        let boxes = vec![BoundingBox::new(40, 40, 60, 55)];
        let center = (50.0, 50.0);

        let m = get_rotation_matrix2d(center, 2.0, 1.0);
        let (mid, mid_boxes) = warp_affine_with_boxes(src.clone(), boxes.clone(), &m, src.size())?;

        let m_back = get_rotation_matrix2d(center, -2.0, 1.0);
        let (_, out_boxes) = warp_affine_with_boxes(mid, mid_boxes, &m_back, src.size())?;

        assert_eq!(out_boxes.len(), 1);
        let (out, original) = (out_boxes[0], boxes[0]);
        assert!((out.x_min - original.x_min).abs() <= 2);
        assert!((out.y_min - original.y_min).abs() <= 2);
        assert!((out.x_max - original.x_max).abs() <= 2);
        assert!((out.y_max - original.y_max).abs() <= 2);

        Ok(())
    }
}
