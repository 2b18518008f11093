pub mod error;
pub mod consts;
pub mod image;
pub mod shifts;
pub mod shifter;
pub mod stats;
pub mod engine;
