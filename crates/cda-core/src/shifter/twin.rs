use ndarray::Array2;

use crate::error::Result;
use crate::image::{check_shape, Mask, Shape};

use super::index::MaskIndex;

/// Shifts two equal-size images simultaneously by (dx, dy), confined so that
/// no value ever moves to, or originates from, a position outside the mask.
///
/// The shift is toroidal per row/column member list: values leaving one end
/// of a row's membership list re-enter at the other end. The X pass runs
/// first, then the Y pass over the already X-shifted working copies.
#[derive(Clone, Debug)]
pub struct TwinShifter {
    index: MaskIndex,
}

impl TwinShifter {
    /// `None` mask is equivalent to a fully-true mask.
    pub fn new(width: usize, height: usize, mask: Option<&Mask>) -> Self {
        Self {
            index: MaskIndex::new(width, height, mask),
        }
    }

    pub fn width(&self) -> usize {
        self.index.width()
    }

    pub fn height(&self) -> usize {
        self.index.height()
    }

    /// Shift the pair `(a, b)` by (dx, dy), returning fresh output arrays.
    ///
    /// Generic over element types so a channel plane can be shifted together
    /// with its ROI mask. Both arrays receive the identical permutation.
    pub fn run<A: Copy, B: Copy>(
        &self,
        a: &Array2<A>,
        b: &Array2<B>,
        dx: i32,
        dy: i32,
    ) -> Result<(Array2<A>, Array2<B>)> {
        self.check_dims("first twin image", a.dim())?;
        self.check_dims("second twin image", b.dim())?;

        let mut out_a = a.clone();
        let mut out_b = b.clone();

        if dx != 0 {
            shift_rows(&mut out_a, self.index.rows(), dx);
            shift_rows(&mut out_b, self.index.rows(), dx);
        }
        if dy != 0 {
            shift_cols(&mut out_a, self.index.cols(), dy);
            shift_cols(&mut out_b, self.index.cols(), dy);
        }

        Ok((out_a, out_b))
    }

    fn check_dims(&self, context: &'static str, dim: (usize, usize)) -> Result<()> {
        let (h, w) = dim;
        check_shape(
            context,
            Shape {
                width: self.index.width(),
                height: self.index.height(),
                depth: 1,
            },
            Shape {
                width: w,
                height: h,
                depth: 1,
            },
        )
    }
}

/// Cyclically rotate each row's member values by `dx` positions.
///
/// A row whose membership list is empty is a no-op; shift magnitudes wrap
/// modulo the list length, so `dx` and `dx + k·len` are equivalent.
fn shift_rows<T: Copy>(data: &mut Array2<T>, rows: &[Vec<usize>], dx: i32) {
    let mut buf: Vec<T> = Vec::new();
    for (row, members) in rows.iter().enumerate() {
        if members.is_empty() {
            continue;
        }
        let k = dx.rem_euclid(members.len() as i32) as usize;
        if k == 0 {
            continue;
        }
        buf.clear();
        buf.extend(members.iter().map(|&col| data[[row, col]]));
        buf.rotate_right(k);
        for (i, &col) in members.iter().enumerate() {
            data[[row, col]] = buf[i];
        }
    }
}

/// Column counterpart of [`shift_rows`].
fn shift_cols<T: Copy>(data: &mut Array2<T>, cols: &[Vec<usize>], dy: i32) {
    let mut buf: Vec<T> = Vec::new();
    for (col, members) in cols.iter().enumerate() {
        if members.is_empty() {
            continue;
        }
        let k = dy.rem_euclid(members.len() as i32) as usize;
        if k == 0 {
            continue;
        }
        buf.clear();
        buf.extend(members.iter().map(|&row| data[[row, col]]));
        buf.rotate_right(k);
        for (i, &row) in members.iter().enumerate() {
            data[[row, col]] = buf[i];
        }
    }
}
