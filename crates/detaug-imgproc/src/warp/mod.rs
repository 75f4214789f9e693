//! Affine warping of images.

mod affine;

pub use affine::{
    get_affine_transform, get_rotation_matrix2d, invert_affine_transform, transform_point,
    warp_affine,
};
