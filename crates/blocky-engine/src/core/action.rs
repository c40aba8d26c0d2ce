use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{block::Block, colour::Colour, path::BlockPath};

/// Direction of a [`Block::rotate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Mirror axis of a [`Block::swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapAxis {
    /// Exchange the left and right halves.
    Horizontal,
    /// Exchange the top and bottom halves.
    Vertical,
}

/// Something a player can do to a block on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Rotate(Rotation),
    Swap(SwapAxis),
    Smash,
    /// Paint a leaf with the acting player's goal colour.
    Paint,
    Combine,
    Pass,
}

impl Action {
    pub const ROTATE_CLOCKWISE: Self = Self::Rotate(Rotation::Clockwise);
    pub const ROTATE_COUNTER_CLOCKWISE: Self = Self::Rotate(Rotation::CounterClockwise);
    pub const SWAP_HORIZONTAL: Self = Self::Swap(SwapAxis::Horizontal);
    pub const SWAP_VERTICAL: Self = Self::Swap(SwapAxis::Vertical);

    /// Actions a computer player considers, in the order they are tried.
    ///
    /// [`Action::Pass`] is never a candidate.
    pub const CANDIDATES: [Self; 7] = [
        Self::Smash,
        Self::SWAP_HORIZONTAL,
        Self::SWAP_VERTICAL,
        Self::ROTATE_COUNTER_CLOCKWISE,
        Self::ROTATE_CLOCKWISE,
        Self::Paint,
        Self::Combine,
    ];

    /// Name of the action kind, without its direction.
    #[must_use]
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Rotate(_) => "rotate",
            Self::Swap(_) => "swap",
            Self::Smash => "smash",
            Self::Paint => "paint",
            Self::Combine => "combine",
            Self::Pass => "pass",
        }
    }

    /// Numeric direction parameter of rotations and swaps.
    ///
    /// Rotations count clockwise quarter turns (1 or 3); swaps use 0 for horizontal and
    /// 1 for vertical.
    #[must_use]
    pub const fn direction(self) -> Option<u8> {
        match self {
            Self::Rotate(Rotation::Clockwise) => Some(1),
            Self::Rotate(Rotation::CounterClockwise) => Some(3),
            Self::Swap(SwapAxis::Horizontal) => Some(0),
            Self::Swap(SwapAxis::Vertical) => Some(1),
            Self::Smash | Self::Paint | Self::Combine | Self::Pass => None,
        }
    }

    /// Performs this action on `block`.
    ///
    /// `paint_colour` is used by [`Action::Paint`]; `rng` by [`Action::Smash`].
    /// Returns the success flag of the underlying [`Block`] operation. [`Action::Pass`]
    /// always succeeds and changes nothing.
    pub fn perform<R>(self, block: &mut Block, paint_colour: Colour, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Rotate(rotation) => block.rotate(rotation),
            Self::Swap(axis) => block.swap(axis),
            Self::Smash => block.smash(rng),
            Self::Paint => block.paint(paint_colour),
            Self::Combine => block.combine(),
            Self::Pass => true,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(direction) => write!(f, "{} {direction}", self.kind()),
            None => f.write_str(self.kind()),
        }
    }
}

/// An action aimed at one block of a board.
///
/// The target is a [`BlockPath`], so a move chosen by looking at a scratch copy of the
/// board can be applied to the authoritative board afterwards.
///
/// # Example
///
/// ```
/// use blocky_engine::{Action, Block, BlockPath, Colour, Move};
///
/// let mut board = Block::new_root(16, 2, Colour::REAL_RED).unwrap();
/// let paint = Move::new(Action::Paint, BlockPath::ROOT);
///
/// let mut rng = rand::rng();
/// assert!(paint.apply(&mut board, Colour::OLD_OLIVE, &mut rng));
/// assert_eq!(board.colour(), Some(Colour::OLD_OLIVE));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    action: Action,
    target: BlockPath,
}

impl Move {
    #[must_use]
    pub fn new(action: Action, target: BlockPath) -> Self {
        Self { action, target }
    }

    #[must_use]
    pub fn pass() -> Self {
        Self::new(Action::Pass, BlockPath::ROOT)
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn target(&self) -> &BlockPath {
        &self.target
    }

    /// Applies this move to `board`.
    ///
    /// Returns `false`, leaving the board untouched, if the target path does not resolve
    /// or the action is not valid on the target.
    pub fn apply<R>(&self, board: &mut Block, paint_colour: Colour, rng: &mut R) -> bool
    where
        R: Rng + ?Sized,
    {
        let Some(block) = board.get_mut(&self.target) else {
            return false;
        };
        self.action.perform(block, paint_colour, rng)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.action, self.target)
    }
}
