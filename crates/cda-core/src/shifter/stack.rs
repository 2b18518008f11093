use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_SLICE_THRESHOLD;
use crate::error::{CdaError, Result};
use crate::image::{MaskVolume, Shape};

use super::twin::TwinShifter;

/// Applies one [`TwinShifter`] per depth slice, each built from that slice's
/// own mask. `run` applies the same (dx, dy) to every slice independently.
#[derive(Clone, Debug)]
pub struct TwinStackShifter {
    shifters: Vec<TwinShifter>,
    shape: Shape,
}

impl TwinStackShifter {
    /// Build per-slice shifters from a mask volume. Index construction is the
    /// expensive part, so it runs slice-parallel for deeper stacks.
    pub fn from_masks(masks: &MaskVolume) -> Self {
        let (width, height) = (masks.width(), masks.height());
        let shifters = if masks.depth() >= PARALLEL_SLICE_THRESHOLD {
            masks
                .slices()
                .par_iter()
                .map(|mask| TwinShifter::new(width, height, Some(mask)))
                .collect()
        } else {
            masks
                .slices()
                .iter()
                .map(|mask| TwinShifter::new(width, height, Some(mask)))
                .collect()
        };
        Self {
            shifters,
            shape: masks.shape(),
        }
    }

    /// Unconstrained variant: every slice uses full-image membership.
    pub fn unmasked(shape: Shape) -> Self {
        Self {
            shifters: (0..shape.depth)
                .map(|_| TwinShifter::new(shape.width, shape.height, None))
                .collect(),
            shape,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Shift both slice stacks by (dx, dy), slice by slice.
    pub fn run<A: Copy, B: Copy>(
        &self,
        a: &[Array2<A>],
        b: &[Array2<B>],
        dx: i32,
        dy: i32,
    ) -> Result<(Vec<Array2<A>>, Vec<Array2<B>>)> {
        self.check_depth("first twin stack", a.len())?;
        self.check_depth("second twin stack", b.len())?;

        let mut out_a = Vec::with_capacity(self.shifters.len());
        let mut out_b = Vec::with_capacity(self.shifters.len());
        for (z, shifter) in self.shifters.iter().enumerate() {
            let (sa, sb) = shifter.run(&a[z], &b[z], dx, dy)?;
            out_a.push(sa);
            out_b.push(sb);
        }
        Ok((out_a, out_b))
    }

    fn check_depth(&self, context: &'static str, depth: usize) -> Result<()> {
        if depth != self.shape.depth {
            return Err(CdaError::DimensionMismatch {
                context,
                expected: self.shape,
                actual: Shape {
                    depth,
                    ..self.shape
                },
            });
        }
        Ok(())
    }
}
