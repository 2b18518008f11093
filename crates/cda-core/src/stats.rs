use crate::error::Result;
use crate::image::{check_shape, MaskVolume, Volume};

/// Streaming sums for colocalization statistics over an overlap region.
///
/// All sums accumulate in f64, wide enough that intensity totals across any
/// realistic volume neither overflow nor lose integer precision.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColocAccumulator {
    n: u64,
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_xx: f64,
    sum_yy: f64,
}

impl ColocAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one overlapping pixel pair (x from channel 1, y from
    /// channel 2).
    pub fn push(&mut self, x: f64, y: f64) {
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_xx += x * x;
        self.sum_yy += y * y;
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    /// Channel-1 intensity total over the overlap (Mander's numerator 1).
    pub fn sum_x(&self) -> f64 {
        self.sum_x
    }

    /// Channel-2 intensity total over the overlap (Mander's numerator 2).
    pub fn sum_y(&self) -> f64 {
        self.sum_y
    }

    /// Pearson's correlation coefficient over the accumulated samples.
    ///
    /// NaN when no samples were accumulated or either variance term is zero
    /// (constant channel); consumers treat NaN as "undefined", not an error.
    pub fn pearson(&self) -> f64 {
        if self.n == 0 {
            return f64::NAN;
        }
        let n = self.n as f64;
        let cov = self.sum_xy - self.sum_x * self.sum_y / n;
        let var_x = self.sum_xx - self.sum_x * self.sum_x / n;
        let var_y = self.sum_yy - self.sum_y * self.sum_y / n;
        if var_x <= 0.0 || var_y <= 0.0 {
            return f64::NAN;
        }
        cov / (var_x * var_y).sqrt()
    }
}

/// Mander's coefficient: overlap intensity over the channel's own-ROI total.
/// NaN when the denominator is zero.
pub fn manders(overlap_sum: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        f64::NAN
    } else {
        overlap_sum / denominator
    }
}

/// Total intensity of `volume` restricted to `masks` — the per-channel
/// denominator a driver precomputes once before constructing the engine.
pub fn masked_total(volume: &Volume, masks: &MaskVolume) -> Result<f64> {
    check_shape("masked total", volume.shape(), masks.shape())?;
    let mut total = 0.0f64;
    for z in 0..volume.depth() {
        let data = volume.slice(z);
        let mask = masks.slice(z);
        let (h, w) = data.dim();
        for row in 0..h {
            for col in 0..w {
                if mask[[row, col]] {
                    total += data[[row, col]] as f64;
                }
            }
        }
    }
    Ok(total)
}
