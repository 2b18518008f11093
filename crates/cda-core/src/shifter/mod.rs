pub mod index;
pub mod stack;
pub mod twin;

pub use index::MaskIndex;
pub use stack::TwinStackShifter;
pub use twin::TwinShifter;
