use std::fmt;

use blocky_engine::{Action, Block, BlockPath, Move};
use blocky_evaluator::Goal;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

/// Chooses a move for a computer player.
///
/// Strategies only ever try actions on private copies of `board`; the board passed in is left
/// untouched. The returned move targets `board` itself (the empty path). `None` means no move
/// this time, and the caller may ask again later.
pub trait Strategy: fmt::Debug + Send {
    fn generate_move(&mut self, board: &Block, goal: &dyn Goal) -> Option<Move>;
}

fn seeded_rng(seed: Option<u64>) -> Pcg32 {
    match seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    }
}

/// Picks any action that would succeed on the board, uniformly at random.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: Pcg32,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: seeded_rng(None),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: seeded_rng(Some(seed)),
        }
    }
}

impl Strategy for RandomStrategy {
    /// Draws candidates from [`Action::CANDIDATES`] without replacement until one succeeds on a
    /// throwaway copy of `board`.
    fn generate_move(&mut self, board: &Block, goal: &dyn Goal) -> Option<Move> {
        let mut remaining = Action::CANDIDATES.to_vec();
        while !remaining.is_empty() {
            let index = self.rng.random_range(0..remaining.len());
            let action = remaining[index];
            let mut trial = board.create_copy();
            if action.perform(&mut trial, goal.colour(), &mut self.rng) {
                log::debug!("random strategy chose {action}");
                return Some(Move::new(action, BlockPath::ROOT));
            }
            log::trace!("random strategy: {action} not applicable");
            remaining.swap_remove(index);
        }
        log::debug!("random strategy found no applicable action");
        None
    }
}

/// A move together with the goal score it reached on a trial copy.
///
/// For [`Action::Smash`] the score belongs to the trial's random colours. Applying the move to
/// the real board rolls new ones, so the resulting score may be lower than `score`, even lower
/// than the score before the move. Every other action reaches exactly `score`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: usize,
}

/// Picks the single action that raises the player's own score the most.
///
/// Every candidate is applied to a fresh copy of the board and scored. The best one is chosen
/// only if it beats the score of the unmodified board; ties go to the earlier candidate in
/// [`Action::CANDIDATES`].
#[derive(Debug, Clone)]
pub struct GreedyStrategy {
    rng: Pcg32,
}

impl Default for GreedyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl GreedyStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: seeded_rng(None),
        }
    }

    /// Like [`Self::new`], but smash trials use a reproducible colour sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: seeded_rng(Some(seed)),
        }
    }

    /// Evaluates every candidate and returns the best strict improvement, if any.
    ///
    /// # Example
    ///
    /// ```
    /// use blocky_ai::GreedyStrategy;
    /// use blocky_engine::{Action, Block};
    /// use blocky_evaluator::{Goal as _, PerimeterGoal};
    ///
    /// let board = Block::from_ascii(
    ///     8,
    ///     "
    ///     BR
    ///     YG
    ///     ",
    /// );
    /// let goal = PerimeterGoal::new(blocky_engine::Colour::REAL_RED);
    /// assert_eq!(goal.score(&board), 2);
    ///
    /// let best = GreedyStrategy::with_seed(0)
    ///     .select_best_move(&board, &goal)
    ///     .unwrap();
    /// assert_eq!(best.mv.action(), Action::Combine);
    /// ```
    pub fn select_best_move(&mut self, board: &Block, goal: &dyn Goal) -> Option<ScoredMove> {
        let current_score = goal.score(board);
        let mut best_score = current_score;
        let mut best_action = None;

        for action in Action::CANDIDATES {
            let mut trial = board.create_copy();
            if !action.perform(&mut trial, goal.colour(), &mut self.rng) {
                log::trace!("greedy strategy: {action} not applicable");
                continue;
            }
            let score = goal.score(&trial);
            log::trace!("greedy strategy: {action} scores {score}");
            if score > best_score {
                best_score = score;
                best_action = Some(action);
            }
        }

        let Some(action) = best_action else {
            log::debug!("greedy strategy: nothing beats current score {current_score}");
            return None;
        };
        log::debug!("greedy strategy chose {action} ({current_score} -> {best_score})");
        Some(ScoredMove {
            mv: Move::new(action, BlockPath::ROOT),
            score: best_score,
        })
    }
}

impl Strategy for GreedyStrategy {
    fn generate_move(&mut self, board: &Block, goal: &dyn Goal) -> Option<Move> {
        self.select_best_move(board, goal).map(|scored| scored.mv)
    }
}
