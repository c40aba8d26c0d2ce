use std::fmt;

use blocky_engine::{Action, Block, BlockPath, Move};
use blocky_evaluator::{BoxedGoal, Goal, GoalGenerationError, generate_goals};
use rand::Rng;

use crate::{GreedyStrategy, RandomStrategy, Strategy};

/// Discrete input delivered to players by the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Asks a computer player to make its move.
    Proceed,
    /// The pointer moved to a board location.
    PointerMoved { x: u32, y: u32 },
    /// Selects the enclosing (larger) block.
    LevelUp,
    /// Selects a nested (smaller) block.
    LevelDown,
    /// Requests an action on the selected block.
    Action(Action),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum PlayerKind {
    #[display("human")]
    Human,
    #[display("random")]
    Random,
    #[display("smart")]
    Smart,
}

/// A participant in a game.
///
/// Players are polled: [`generate_move`](Self::generate_move) returns `None` until the player
/// has something to play, and may be called again at any time.
pub trait Player: fmt::Debug + Send {
    fn id(&self) -> usize;

    fn kind(&self) -> PlayerKind;

    fn goal(&self) -> &dyn Goal;

    fn process_event(&mut self, event: PlayerEvent);

    /// The block this player is currently pointing at, if any.
    fn selected_block<'a>(&self, board: &'a Block) -> Option<&'a Block>;

    /// Returns the next move to apply to `board`, or `None` if there is none yet.
    ///
    /// The move is not guaranteed to be valid; `board` is never modified.
    fn generate_move(&mut self, board: &Block) -> Option<Move>;
}

pub type BoxedPlayer = Box<dyn Player>;

/// A player driven by pointer and keyboard events.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    id: usize,
    goal: BoxedGoal,
    level: u32,
    pointer: Option<(u32, u32)>,
    pending_action: Option<Action>,
}

impl HumanPlayer {
    #[must_use]
    pub fn new(id: usize, goal: BoxedGoal) -> Self {
        Self {
            id,
            goal,
            level: 0,
            pointer: None,
            pending_action: None,
        }
    }

    /// Level of the blocks this player selects; 0 is the whole board.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn pending_action(&self) -> Option<Action> {
        self.pending_action
    }

    pub fn set_pending_action(&mut self, action: Action) {
        self.pending_action = Some(action);
    }

    /// Path of the block at this player's level that contains `location`.
    ///
    /// Falls back to the deepest block there when the board is not subdivided that far.
    #[must_use]
    pub fn select_block_at(&self, board: &Block, location: (u32, u32)) -> Option<BlockPath> {
        board.locate(location, self.level)
    }
}

impl Player for HumanPlayer {
    fn id(&self) -> usize {
        self.id
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }

    fn goal(&self) -> &dyn Goal {
        self.goal.as_ref()
    }

    fn process_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Proceed => {}
            PlayerEvent::PointerMoved { x, y } => self.pointer = Some((x, y)),
            PlayerEvent::LevelUp => {
                self.level = self.level.saturating_sub(1);
                self.pending_action = None;
            }
            PlayerEvent::LevelDown => {
                self.level = self.level.saturating_add(1);
                self.pending_action = None;
            }
            PlayerEvent::Action(action) => self.set_pending_action(action),
        }
    }

    fn selected_block<'a>(&self, board: &'a Block) -> Option<&'a Block> {
        board.block_at(self.pointer?, self.level)
    }

    /// Emits the pending action on the selected block, once.
    fn generate_move(&mut self, board: &Block) -> Option<Move> {
        let target = self.select_block_at(board, self.pointer?)?;
        let action = self.pending_action.take()?;
        Some(Move::new(action, target))
    }
}

/// A player that moves with a [`Strategy`] each time it is told to proceed.
#[derive(Debug, Clone)]
pub struct ComputerPlayer<S> {
    id: usize,
    kind: PlayerKind,
    goal: BoxedGoal,
    strategy: S,
    proceed: bool,
}

pub type RandomPlayer = ComputerPlayer<RandomStrategy>;
pub type SmartPlayer = ComputerPlayer<GreedyStrategy>;

impl RandomPlayer {
    #[must_use]
    pub fn new(id: usize, goal: BoxedGoal, strategy: RandomStrategy) -> Self {
        Self::with_strategy(id, PlayerKind::Random, goal, strategy)
    }
}

impl SmartPlayer {
    #[must_use]
    pub fn new(id: usize, goal: BoxedGoal, strategy: GreedyStrategy) -> Self {
        Self::with_strategy(id, PlayerKind::Smart, goal, strategy)
    }
}

impl<S> ComputerPlayer<S>
where
    S: Strategy,
{
    #[must_use]
    pub fn with_strategy(id: usize, kind: PlayerKind, goal: BoxedGoal, strategy: S) -> Self {
        Self {
            id,
            kind,
            goal,
            strategy,
            proceed: false,
        }
    }

    /// Returns `true` after a [`PlayerEvent::Proceed`] until a move is emitted.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.proceed
    }
}

impl<S> Player for ComputerPlayer<S>
where
    S: Strategy,
{
    fn id(&self) -> usize {
        self.id
    }

    fn kind(&self) -> PlayerKind {
        self.kind
    }

    fn goal(&self) -> &dyn Goal {
        self.goal.as_ref()
    }

    fn process_event(&mut self, event: PlayerEvent) {
        if event == PlayerEvent::Proceed {
            self.proceed = true;
        }
    }

    fn selected_block<'a>(&self, _board: &'a Block) -> Option<&'a Block> {
        None
    }

    fn generate_move(&mut self, board: &Block) -> Option<Move> {
        if !self.proceed {
            return None;
        }
        let mv = self.strategy.generate_move(board, self.goal.as_ref())?;
        self.proceed = false;
        Some(mv)
    }
}

/// Creates the players of a game: humans first, then random players, then smart players.
///
/// Ids run from 0 in that order. Every player gets a goal of the same kind with a distinct
/// colour, and every computer player a strategy seeded from `rng`.
///
/// # Example
///
/// ```
/// use blocky_ai::{PlayerKind, create_players};
///
/// let players = create_players(1, 1, 2, &mut rand::rng()).unwrap();
/// let kinds: Vec<_> = players.iter().map(|player| player.kind()).collect();
/// assert_eq!(
///     kinds,
///     [PlayerKind::Human, PlayerKind::Random, PlayerKind::Smart, PlayerKind::Smart]
/// );
/// ```
pub fn create_players<R>(
    num_human: usize,
    num_random: usize,
    num_smart: usize,
    rng: &mut R,
) -> Result<Vec<BoxedPlayer>, GoalGenerationError>
where
    R: Rng + ?Sized,
{
    let goals = generate_goals(num_human + num_random + num_smart, rng)?;
    let players = goals
        .into_iter()
        .enumerate()
        .map(|(id, goal)| -> BoxedPlayer {
            if id < num_human {
                Box::new(HumanPlayer::new(id, goal))
            } else if id < num_human + num_random {
                Box::new(RandomPlayer::new(
                    id,
                    goal,
                    RandomStrategy::with_seed(rng.random()),
                ))
            } else {
                Box::new(SmartPlayer::new(
                    id,
                    goal,
                    GreedyStrategy::with_seed(rng.random()),
                ))
            }
        })
        .collect();
    Ok(players)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use blocky_engine::{Colour, Quadrant};
    use blocky_evaluator::{GoalKind, PerimeterGoal};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn board() -> Block {
        Block::from_ascii(
            16,
            "
            RRBG
            RRYY
            GGBB
            GGBB
            ",
        )
    }

    fn human() -> HumanPlayer {
        HumanPlayer::new(0, GoalKind::Blob.create(Colour::REAL_RED))
    }

    #[test]
    fn test_human_level_changes_clear_pending_action() {
        let mut player = human();
        player.process_event(PlayerEvent::LevelUp);
        assert_eq!(player.level(), 0);

        player.process_event(PlayerEvent::Action(Action::Smash));
        assert_eq!(player.pending_action(), Some(Action::Smash));
        player.process_event(PlayerEvent::LevelDown);
        assert_eq!(player.level(), 1);
        assert_eq!(player.pending_action(), None);

        player.set_pending_action(Action::Combine);
        player.process_event(PlayerEvent::LevelUp);
        assert_eq!(player.level(), 0);
        assert_eq!(player.pending_action(), None);
    }

    #[test]
    fn test_human_selects_block_under_pointer() {
        let board = board();
        let mut player = human();
        assert!(player.selected_block(&board).is_none());

        player.process_event(PlayerEvent::PointerMoved { x: 13, y: 2 });
        assert_eq!(player.selected_block(&board), Some(&board));

        player.process_event(PlayerEvent::LevelDown);
        player.process_event(PlayerEvent::LevelDown);
        let selected = player.selected_block(&board).unwrap();
        assert_eq!(selected.position(), (12, 0));
        assert_eq!(selected.colour(), Some(Colour::OLD_OLIVE));

        // the top-left quadrant is one red leaf, so deeper levels stop there
        player.process_event(PlayerEvent::PointerMoved { x: 5, y: 6 });
        let selected = player.selected_block(&board).unwrap();
        assert_eq!(selected.position(), (0, 0));
        assert_eq!(selected.size(), 8);
        assert_eq!(
            player.select_block_at(&board, (5, 6)),
            Some(BlockPath::ROOT.child(Quadrant::TopLeft))
        );

        assert_eq!(player.select_block_at(&board, (16, 0)), None);
    }

    #[test]
    fn test_human_move_is_emitted_once() {
        let board = board();
        let mut player = human();
        player.process_event(PlayerEvent::Action(Action::ROTATE_CLOCKWISE));
        // no pointer yet
        assert_eq!(player.generate_move(&board), None);

        player.process_event(PlayerEvent::PointerMoved { x: 9, y: 9 });
        let mv = player.generate_move(&board).unwrap();
        assert_eq!(mv, Move::new(Action::ROTATE_CLOCKWISE, BlockPath::ROOT));
        assert_eq!(player.generate_move(&board), None);
    }

    #[test]
    fn test_computer_players_wait_for_proceed() {
        let board = board();
        let goal = || Box::new(PerimeterGoal::new(Colour::DAFFODIL_DELIGHT)) as BoxedGoal;
        let mut players: [BoxedPlayer; 2] = [
            Box::new(RandomPlayer::new(0, goal(), RandomStrategy::with_seed(0))),
            Box::new(SmartPlayer::new(1, goal(), GreedyStrategy::with_seed(0))),
        ];
        for player in &mut players {
            assert_eq!(player.generate_move(&board), None);
            player.process_event(PlayerEvent::PointerMoved { x: 1, y: 1 });
            player.process_event(PlayerEvent::Action(Action::Smash));
            assert_eq!(player.generate_move(&board), None);
            assert!(player.selected_block(&board).is_none());

            player.process_event(PlayerEvent::Proceed);
            assert!(player.generate_move(&board).is_some());
            // back to idle
            assert_eq!(player.generate_move(&board), None);
        }
    }

    #[test]
    fn test_smart_player_keeps_searching_without_improvement() {
        let board = Block::new_root(8, 1, Colour::REAL_RED).unwrap();
        let mut player = SmartPlayer::new(
            0,
            Box::new(PerimeterGoal::new(Colour::REAL_RED)),
            GreedyStrategy::with_seed(0),
        );
        player.process_event(PlayerEvent::Proceed);
        assert_eq!(player.generate_move(&board), None);
        assert!(player.is_searching());
    }

    #[test]
    fn test_create_players() {
        let mut rng = Pcg32::seed_from_u64(3);
        let players = create_players(1, 2, 1, &mut rng).unwrap();
        let ids: Vec<_> = players.iter().map(|player| player.id()).collect();
        assert_eq!(ids, [0, 1, 2, 3]);
        let kinds: Vec<_> = players.iter().map(|player| player.kind()).collect();
        assert_eq!(
            kinds,
            [
                PlayerKind::Human,
                PlayerKind::Random,
                PlayerKind::Random,
                PlayerKind::Smart
            ]
        );
        let colours: HashSet<_> = players.iter().map(|player| player.goal().colour()).collect();
        assert_eq!(colours.len(), 4);

        assert!(create_players(2, 2, 1, &mut rng).is_err());
        assert!(create_players(0, 0, 0, &mut rng).unwrap().is_empty());
    }
}
