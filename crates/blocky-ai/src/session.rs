use blocky_engine::{Block, BoardGenerator, BoardSeed, BoardSizeError, Colour, Move};
use blocky_evaluator::GoalGenerationError;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{BoxedPlayer, PlayerEvent, create_players};

/// Settings of one game, usually loaded from JSON.
///
/// # Example
///
/// ```
/// use blocky_ai::GameConfig;
///
/// let config = GameConfig::from_json_str(
///     r#"{
///         "max_depth": 3,
///         "board_size": 768,
///         "num_random": 1,
///         "num_smart": 1,
///         "max_turns": 10,
///         "seed": "000102030405060708090a0b0c0d0e0f"
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(config.num_players(), 2);
/// assert_eq!(config.num_human, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub max_depth: u32,
    pub board_size: u32,
    #[serde(default)]
    pub num_human: usize,
    #[serde(default)]
    pub num_random: usize,
    #[serde(default)]
    pub num_smart: usize,
    pub max_turns: usize,
    /// Seed of the board and of every random choice; a fresh one is drawn when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<BoardSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            board_size: 768,
            num_human: 0,
            num_random: 1,
            num_smart: 1,
            max_turns: 10,
            seed: None,
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("invalid game config: {_0}")]
    #[from]
    Json(serde_json::Error),
    #[display("a game needs at least one player")]
    NoPlayers,
    #[display("{requested} players cannot each get one of {available} colours")]
    TooManyPlayers { requested: usize, available: usize },
    #[display("{_0}")]
    #[from]
    BoardSize(BoardSizeError),
    #[display("{_0}")]
    #[from]
    Goals(GoalGenerationError),
}

impl GameConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.num_human + self.num_random + self.num_smart
    }

    /// Checks that a game can be set up from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let requested = self.num_players();
        if requested == 0 {
            return Err(ConfigError::NoPlayers);
        }
        let available = Colour::PALETTE.len();
        if requested > available {
            return Err(ConfigError::TooManyPlayers {
                requested,
                available,
            });
        }
        Block::check_shape(self.board_size, self.max_depth)?;
        Ok(())
    }
}

/// What happened on a call to [`GameSession::play_turn`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum TurnOutcome {
    /// A human player has not chosen a move yet; the turn stays with them.
    Waiting,
    /// A computer player found nothing to do and gave up its turn.
    Passed { player: usize },
    /// The move was invalid on the board; the turn stays with the player.
    Rejected { player: usize, mv: Move },
    Applied { player: usize, mv: Move },
    GameOver,
}

/// A turn-based game over one authoritative board.
///
/// Players take turns in id order. Only moves returned by players are ever applied to the
/// board, one per turn.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    board: Block,
    players: Vec<BoxedPlayer>,
    current: usize,
    turns_played: usize,
    rng: Pcg32,
}

impl GameSession {
    /// Validates `config`, then generates the board and the players.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let board =
            BoardGenerator::with_seed(seed).generate(config.max_depth, config.board_size)?;
        let mut rng = Pcg32::from_seed(seed.to_bytes());
        // keep player randomness apart from the board's sequence
        rng.advance(1 << 32);
        let players = create_players(
            config.num_human,
            config.num_random,
            config.num_smart,
            &mut rng,
        )?;
        log::debug!(
            "new game: seed {seed}, {} players, board depth {}",
            players.len(),
            board.depth()
        );
        Ok(Self {
            config,
            board,
            players,
            current: 0,
            turns_played: 0,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Block {
        &self.board
    }

    #[must_use]
    pub fn players(&self) -> &[BoxedPlayer] {
        &self.players
    }

    #[must_use]
    pub fn current_player(&self) -> &BoxedPlayer {
        &self.players[self.current]
    }

    #[must_use]
    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.turns_played >= self.config.max_turns
    }

    /// Current goal score of every player, in id order.
    #[must_use]
    pub fn scores(&self) -> Vec<usize> {
        self.players
            .iter()
            .map(|player| player.goal().score(&self.board))
            .collect()
    }

    /// Delivers an input event to the player whose turn it is.
    pub fn process_event(&mut self, event: PlayerEvent) {
        self.players[self.current].process_event(event);
    }

    /// Plays one turn of the current player.
    ///
    /// Computer players are told to proceed first. A turn counts as played when a move is
    /// applied or a computer player passes.
    pub fn play_turn(&mut self) -> TurnOutcome {
        if self.is_over() {
            return TurnOutcome::GameOver;
        }

        let player = &mut self.players[self.current];
        let id = player.id();
        let is_human = player.kind().is_human();
        if !is_human {
            player.process_event(PlayerEvent::Proceed);
        }

        let Some(mv) = player.generate_move(&self.board) else {
            if is_human {
                return TurnOutcome::Waiting;
            }
            log::debug!("turn {}: player {id} passes", self.turns_played);
            self.advance();
            return TurnOutcome::Passed { player: id };
        };

        let paint_colour = player.goal().colour();
        if !mv.apply(&mut self.board, paint_colour, &mut self.rng) {
            log::warn!("turn {}: player {id} tried invalid move {mv}", self.turns_played);
            return TurnOutcome::Rejected { player: id, mv };
        }
        log::debug!("turn {}: player {id} played {mv}", self.turns_played);
        self.advance();
        TurnOutcome::Applied { player: id, mv }
    }

    fn advance(&mut self) {
        self.turns_played += 1;
        self.current = (self.current + 1) % self.players.len();
    }
}
