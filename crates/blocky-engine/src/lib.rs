pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected combination of board size and maximum depth.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardSizeError {
    #[display("board size {size} cannot be split evenly down to depth {max_depth}")]
    Indivisible { size: u32, max_depth: u32 },
    #[display("board depth {max_depth} exceeds the maximum depth {}", Block::MAX_DEPTH)]
    TooDeep { max_depth: u32 },
}
