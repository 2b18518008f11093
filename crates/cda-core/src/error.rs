use thiserror::Error;

use crate::image::Shape;

#[derive(Error, Debug)]
pub enum CdaError {
    #[error("Empty volume: at least one slice is required")]
    EmptyVolume,

    #[error("Slice {index} is {actual_height}x{actual_width}, expected {expected_height}x{expected_width}")]
    SliceSizeMismatch {
        index: usize,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: Shape,
        actual: Shape,
    },

    #[error("Invalid shift radius range: min {min}, max {max} (limit {limit})")]
    InvalidShiftRange { min: u32, max: u32, limit: u32 },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, CdaError>;
