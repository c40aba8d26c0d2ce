use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    BoardSizeError,
    core::{block::Block, colour::Colour},
};

/// Generates random starting boards.
///
/// # Layout
///
/// The root is always subdivided (unless `max_depth` is 0). Below it, a block at level `L`
/// is subdivided again with probability `exp(-0.25 * L)` as long as `L < max_depth`, so
/// boards get sparser towards the unit-cell level. Every leaf gets a uniformly random
/// palette colour.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    rng: Pcg32,
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for reproducible boards.
    #[must_use]
    pub fn with_seed(seed: BoardSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Generates a board of side `size` with the given maximum depth.
    ///
    /// The shape must pass [`Block::check_shape`].
    pub fn generate(&mut self, max_depth: u32, size: u32) -> Result<Block, BoardSizeError> {
        Block::check_shape(size, max_depth)?;
        let mut board = Block::new_root(size, max_depth, self.rng.random())?;
        if max_depth > 0 {
            self.split(&mut board);
        }
        Ok(board)
    }

    fn split(&mut self, block: &mut Block) {
        let colours: [Colour; 4] = [
            self.rng.random(),
            self.rng.random(),
            self.rng.random(),
            self.rng.random(),
        ];
        let subdivided = block.subdivide(colours);
        debug_assert!(subdivided);

        let level = block.level() + 1;
        if level >= block.max_depth() {
            return;
        }
        let probability = (-0.25 * f64::from(level)).exp();
        let Some(children) = block.children_mut() else {
            return;
        };
        for child in children {
            if self.rng.random_bool(probability) {
                self.split(child);
            }
        }
    }
}

/// Seed for reproducible board generation.
///
/// This is a 128-bit (16-byte) seed for the board generator's random number
/// generator. The same seed always produces the same board, enabling:
///
/// - Replaying a game from its configuration
/// - Deterministic testing
///
/// Serializes as a 32-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed([u8; 16]);

impl BoardSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex digits")]
pub struct ParseBoardSeedError {
    #[error(not(source))]
    input: String,
}

impl FromStr for BoardSeed {
    type Err = ParseBoardSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s.len() == 32 && s.bytes().all(|b| b.is_ascii_hexdigit());
        let num = u128::from_str_radix(s, 16)
            .ok()
            .filter(|_| valid)
            .ok_or_else(|| ParseBoardSeedError {
                input: s.to_owned(),
            })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        BoardSeed(rng.random())
    }
}
