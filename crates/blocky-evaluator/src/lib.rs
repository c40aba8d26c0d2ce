//! Goals for scoring Blocky boards.
//!
//! Every player holds one secret [`Goal`]: a target colour plus a rule for turning a board into
//! a score. Goals are pure functions over a flattened board ([`UnitGrid`]), so scoring a trial
//! copy of the board never affects the authoritative one.
//!
//! # Goal Kinds
//!
//! - [`PerimeterGoal`] - Unit cells of the target colour on the outer edge of the board.
//!   Corner cells sit on two edges and count twice.
//! - [`BlobGoal`] - Size of the largest 4-connected group of target-coloured unit cells.
//!
//! All goals of one game share a [`GoalKind`]; [`generate_goals`] picks it at random and gives
//! each player a distinct palette colour.
//!
//! # Example
//!
//! ```
//! use blocky_engine::{Block, Colour};
//! use blocky_evaluator::{BlobGoal, Goal, PerimeterGoal};
//!
//! let board = Block::from_ascii(
//!     16,
//!     "
//!     RRBB
//!     RRBB
//!     BBBB
//!     BBBR
//!     ",
//! );
//!
//! let perimeter = PerimeterGoal::new(Colour::REAL_RED);
//! assert_eq!(perimeter.score(&board), 6);
//!
//! let blob = BlobGoal::new(Colour::PACIFIC_POINT);
//! assert_eq!(blob.score(&board), 11);
//! ```
//!
//! [`UnitGrid`]: blocky_engine::UnitGrid

pub use self::{blob_goal::*, goal::*, perimeter_goal::*};

mod blob_goal;
mod goal;
mod perimeter_goal;
