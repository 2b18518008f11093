use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SHIFT_SEED, MAX_SHIFT_RADIUS};
use crate::error::{CdaError, Result};

/// A candidate (dx, dy) displacement applied to channel 1 during one
/// re-registration pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftVector {
    pub dx: i32,
    pub dy: i32,
}

impl ShiftVector {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Euclidean displacement magnitude, a pure function of (dx, dy).
    pub fn distance(&self) -> f64 {
        let dx = self.dx as f64;
        let dy = self.dy as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Parameters for the displacement annulus enumeration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShiftSetConfig {
    /// Vectors with `dx² + dy² <= min_radius²` are excluded.
    pub min_radius: u32,
    /// Vectors with `dx² + dy² > max_radius²` are excluded.
    pub max_radius: u32,
    /// When `Some(n)` with `0 < n <` the full count, keep only a uniform
    /// without-replacement sample of `n` vectors.
    #[serde(default)]
    pub sample_count: Option<usize>,
    /// RNG seed for the subsample; the same seed always draws the same set.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_seed() -> u64 {
    DEFAULT_SHIFT_SEED
}

impl Default for ShiftSetConfig {
    fn default() -> Self {
        Self {
            min_radius: 0,
            max_radius: 20,
            sample_count: None,
            seed: DEFAULT_SHIFT_SEED,
        }
    }
}

/// Enumerate every integer displacement in the annulus
/// `min_radius² < dx² + dy² <= max_radius²`, optionally subsampled.
///
/// Each vector appears at most once; enumeration order carries no meaning.
pub fn generate_shift_set(config: &ShiftSetConfig) -> Result<Vec<ShiftVector>> {
    if config.max_radius > MAX_SHIFT_RADIUS || config.min_radius > config.max_radius {
        return Err(CdaError::InvalidShiftRange {
            min: config.min_radius,
            max: config.max_radius,
            limit: MAX_SHIFT_RADIUS,
        });
    }

    let r = config.max_radius as i64;
    let min_sq = (config.min_radius as i64).pow(2);
    let max_sq = r * r;

    let mut shifts = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let d_sq = dx * dx + dy * dy;
            if d_sq > min_sq && d_sq <= max_sq {
                shifts.push(ShiftVector::new(dx as i32, dy as i32));
            }
        }
    }

    if let Some(count) = config.sample_count {
        if count > 0 && count < shifts.len() {
            let mut rng = StdRng::seed_from_u64(config.seed);
            let picked = rand::seq::index::sample(&mut rng, shifts.len(), count);
            return Ok(picked.iter().map(|i| shifts[i]).collect());
        }
    }

    Ok(shifts)
}
