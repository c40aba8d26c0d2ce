//! Board construction.
//!
//! The structural rules of the game live in [`core`](crate::core); this module only builds
//! the random starting layout that those rules are then applied to:
//!
//! - [`BoardGenerator`] - Seeded generator of random quadtree boards
//! - [`BoardSeed`] - Seed for reproducible board generation
//!
//! # Example
//!
//! ```
//! use blocky_engine::{BoardGenerator, BoardSeed};
//! use rand::Rng as _;
//!
//! let seed: BoardSeed = rand::rng().random();
//! let mut generator = BoardGenerator::with_seed(seed);
//!
//! let board = generator.generate(3, 768).unwrap();
//! assert_eq!(board.level(), 0);
//! assert!(board.depth() <= 3);
//! ```

pub use self::board_generator::*;

mod board_generator;
