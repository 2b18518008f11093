use crate::image::Mask;

/// Per-row and per-column mask membership lists, computed once per mask and
/// reused for every shift applied through it.
///
/// `rows[y]` holds the ordered x-positions where row `y` is inside the mask;
/// `cols[x]` the ordered y-positions for column `x`. A constrained cyclic
/// shift permutes values along these lists, never across them.
#[derive(Clone, Debug)]
pub struct MaskIndex {
    width: usize,
    height: usize,
    rows: Vec<Vec<usize>>,
    cols: Vec<Vec<usize>>,
}

impl MaskIndex {
    /// Index the set positions of `mask`.
    pub fn from_mask(mask: &Mask) -> Self {
        let (height, width) = mask.dim();
        let mut rows = vec![Vec::new(); height];
        let mut cols = vec![Vec::new(); width];
        for row in 0..height {
            for col in 0..width {
                if mask[[row, col]] {
                    rows[row].push(col);
                    cols[col].push(row);
                }
            }
        }
        Self {
            width,
            height,
            rows,
            cols,
        }
    }

    /// Full-image membership: every row lists all columns and vice versa.
    /// Equivalent to indexing an all-true mask.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![(0..width).collect(); height],
            cols: vec![(0..height).collect(); width],
        }
    }

    pub fn new(width: usize, height: usize, mask: Option<&Mask>) -> Self {
        match mask {
            Some(mask) => {
                debug_assert_eq!(
                    mask.dim(),
                    (height, width),
                    "mask dimensions disagree with requested index size"
                );
                Self::from_mask(mask)
            }
            None => Self::full(width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    pub fn cols(&self) -> &[Vec<usize>] {
        &self.cols
    }
}
