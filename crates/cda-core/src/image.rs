use std::fmt;

use ndarray::Array2;

use crate::error::{CdaError, Result};

/// A single 2D intensity plane, row-major, shape = (height, width).
pub type Plane = Array2<f32>;

/// A per-pixel membership mask with the same layout as a [`Plane`].
pub type Mask = Array2<bool>;

/// Width/height/depth of a volume, used for validation and error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// An ordered stack of equal-size 2D slices.
///
/// Construction validates that the stack is non-empty and that every slice
/// has the same dimensions, so downstream code can rely on `shape()`.
#[derive(Clone, Debug)]
pub struct SliceStack<T> {
    slices: Vec<Array2<T>>,
}

/// One channel's pixel data for an engine run. Read-only once constructed.
pub type Volume = SliceStack<f32>;

/// A per-slice membership mask volume (ROI or confinement).
pub type MaskVolume = SliceStack<bool>;

impl<T> SliceStack<T> {
    pub fn new(slices: Vec<Array2<T>>) -> Result<Self> {
        let first = slices.first().ok_or(CdaError::EmptyVolume)?;
        let (h, w) = first.dim();
        for (index, slice) in slices.iter().enumerate() {
            let (sh, sw) = slice.dim();
            if sh != h || sw != w {
                return Err(CdaError::SliceSizeMismatch {
                    index,
                    expected_width: w,
                    expected_height: h,
                    actual_width: sw,
                    actual_height: sh,
                });
            }
        }
        Ok(Self { slices })
    }

    /// Single-slice convenience constructor.
    pub fn single(slice: Array2<T>) -> Self {
        Self {
            slices: vec![slice],
        }
    }

    pub fn width(&self) -> usize {
        self.slices[0].ncols()
    }

    pub fn height(&self) -> usize {
        self.slices[0].nrows()
    }

    pub fn depth(&self) -> usize {
        self.slices.len()
    }

    pub fn shape(&self) -> Shape {
        Shape {
            width: self.width(),
            height: self.height(),
            depth: self.depth(),
        }
    }

    pub fn slice(&self, z: usize) -> &Array2<T> {
        &self.slices[z]
    }

    pub fn slices(&self) -> &[Array2<T>] {
        &self.slices
    }
}

impl MaskVolume {
    /// A fully-true mask volume of the given shape.
    pub fn full(shape: Shape) -> Self {
        Self {
            slices: (0..shape.depth)
                .map(|_| Array2::from_elem((shape.height, shape.width), true))
                .collect(),
        }
    }

    /// Per-pixel AND with another mask volume of identical shape.
    pub fn intersect(&self, other: &MaskVolume) -> Result<MaskVolume> {
        check_shape("mask intersection", self.shape(), other.shape())?;
        let slices = self
            .slices
            .iter()
            .zip(other.slices.iter())
            .map(|(a, b)| {
                Array2::from_shape_fn(a.dim(), |(row, col)| a[[row, col]] && b[[row, col]])
            })
            .collect();
        Ok(MaskVolume { slices })
    }
}

/// Check that `actual` matches `expected`, reporting `context` on failure.
pub fn check_shape(context: &'static str, expected: Shape, actual: Shape) -> Result<()> {
    if expected != actual {
        return Err(CdaError::DimensionMismatch {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}
