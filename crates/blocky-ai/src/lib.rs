//! Computer opponents and turn-based play for Blocky.
//!
//! # Components
//!
//! - [`RandomStrategy`] / [`GreedyStrategy`] - Move search over trial copies of the board
//! - [`Player`] - Polled participants: [`HumanPlayer`] driven by [`PlayerEvent`]s, and
//!   [`RandomPlayer`] / [`SmartPlayer`] that search only after a [`PlayerEvent::Proceed`]
//! - [`GameSession`] - The authoritative board, the players, and whose turn it is
//!
//! # Move Search
//!
//! ```text
//! Idle --Proceed--> Searching --move emitted--> Idle
//! ```
//!
//! Strategies never touch the board they are given. Each candidate action is tried on a deep
//! copy, and the chosen [`Move`](blocky_engine::Move) names its target by path so the session
//! can apply it to the real board afterwards. A strategy with nothing to play returns `None`
//! and can simply be polled again.
//!
//! # Example
//!
//! ```
//! use blocky_ai::{GameConfig, GameSession, TurnOutcome};
//!
//! let config = GameConfig {
//!     max_depth: 3,
//!     board_size: 96,
//!     num_random: 1,
//!     num_smart: 2,
//!     max_turns: 6,
//!     ..GameConfig::default()
//! };
//! let mut session = GameSession::new(config).unwrap();
//! while !session.is_over() {
//!     let outcome = session.play_turn();
//!     assert!(outcome.is_applied() || outcome.is_passed());
//! }
//! assert_eq!(session.play_turn(), TurnOutcome::GameOver);
//! println!("scores: {:?}", session.scores());
//! ```
//!
//! The crate logs through the [`log`] facade and installs no logger itself.

pub use self::{player::*, session::*, strategy::*};

mod player;
mod session;
mod strategy;
