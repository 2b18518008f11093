// Not every test binary uses every helper.
#![allow(dead_code)]

use ndarray::Array2;

use cda_core::image::{MaskVolume, Volume};

/// Row-major gradient plane: value at (row, col) is `row * width + col`.
pub fn gradient_plane(height: usize, width: usize) -> Array2<f32> {
    Array2::from_shape_fn((height, width), |(row, col)| (row * width + col) as f32)
}

/// Deterministic pseudo-varied plane, distinct per slice index.
pub fn varied_plane(height: usize, width: usize, z: usize) -> Array2<f32> {
    Array2::from_shape_fn((height, width), |(row, col)| {
        ((row * 7 + col * 13 + z * 5) % 17) as f32
    })
}

pub fn full_mask(height: usize, width: usize) -> Array2<bool> {
    Array2::from_elem((height, width), true)
}

/// Checkerboard mask, true where (row + col) is even.
pub fn checker_mask(height: usize, width: usize) -> Array2<bool> {
    Array2::from_shape_fn((height, width), |(row, col)| (row + col) % 2 == 0)
}

pub fn volume(slices: Vec<Array2<f32>>) -> Volume {
    Volume::new(slices).unwrap()
}

pub fn mask_volume(slices: Vec<Array2<bool>>) -> MaskVolume {
    MaskVolume::new(slices).unwrap()
}

/// Equal, or both NaN. Statistics are deterministic per shift, so identical
/// computations must agree exactly.
pub fn same_stat(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}
