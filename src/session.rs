//! Game session: level progression, resets and the completion state machine.
//!
//! A `GameSession` owns the `ConnectionEngine` for the current level, the random
//! number generator used to build boards, and the grid-size policy. Hosts feed it
//! pointer events (`handle_pointer`) and control actions (`level_up`, `level_down`,
//! `reset_game`), then read a `Snapshot` to render.
use crate::board::{generate_board, Board, Connection, Marker, MarkerId};
use crate::completion::{is_complete, Progress};
use crate::config::GameConfig;
use crate::engine::{ConnectionEngine, PointerEvent};
use crate::error::ConfigError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Maps a level to the side length of its grid.
pub trait GridSizePolicy: fmt::Debug {
    fn grid_size(&self, level: u32) -> usize;
}

/// Grids of `base_size` below `large_from_level`, `large_size` from that level on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPolicy {
    pub base_size: usize,
    pub large_size: usize,
    pub large_from_level: u32,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        ThresholdPolicy {
            base_size: 3,
            large_size: 4,
            large_from_level: 5,
        }
    }
}

impl GridSizePolicy for ThresholdPolicy {
    fn grid_size(&self, level: u32) -> usize {
        if level >= self.large_from_level {
            self.large_size
        } else {
            self.base_size
        }
    }
}

/// Grid size under the default policy: 3x3 for levels 1-4, 4x4 from level 5.
///
/// # Examples
/// ```
/// use connect_dots::session::grid_size_for_level;
/// assert_eq!(grid_size_for_level(1), 3);
/// assert_eq!(grid_size_for_level(4), 3);
/// assert_eq!(grid_size_for_level(5), 4);
/// ```
pub fn grid_size_for_level(level: u32) -> usize {
    ThresholdPolicy::default().grid_size(level)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    LevelComplete,
}

/// Everything a renderer needs after a mutation. Borrowed from the session.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    pub level: u32,
    pub grid_size: usize,
    pub markers: &'a [Marker],
    pub connections: &'a [Connection],
    pub score: u32,
    pub progress: Progress,
    pub complete: bool,
    pub drag_start: Option<MarkerId>,
}

/// One player's game: the current level, its board and the connections made so far.
///
/// The session is generic over its RNG so tests can supply a seeded or scripted one;
/// `GameSession::new` uses a `SmallRng` seeded from the config (or from entropy).
///
/// # Examples
/// ```
/// use connect_dots::config::GameConfig;
/// use connect_dots::session::{GameSession, GameState};
///
/// let config = GameConfig { seed: Some(514514), ..GameConfig::default() };
/// let mut session = GameSession::new(config).unwrap();
/// assert_eq!(session.level(), 1);
/// assert_eq!(session.grid_size(), 3);
/// assert_eq!(session.state(), GameState::Playing);
///
/// session.level_down();
/// assert_eq!(session.level(), 1);
/// ```
#[derive(Debug)]
pub struct GameSession<R = SmallRng> {
    config: GameConfig,
    policy: Box<dyn GridSizePolicy>,
    rng: R,
    level: u32,
    state: GameState,
    engine: ConnectionEngine,
}

impl GameSession<SmallRng> {
    /// Validates `config` and starts a session at level 1.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameSession<R> {
    /// Validates `config` and starts a session at level 1, drawing boards from `rng`.
    ///
    /// `config.seed` is ignored; the caller owns the randomness.
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let policy: Box<dyn GridSizePolicy> = Box::new(config.grid.clone());
        let level = 1;
        let board = generate_board(
            policy.grid_size(level),
            &config.palette,
            config.layout,
            &mut rng,
        );
        let engine = ConnectionEngine::new(board, config.reward);
        debug!(level, grid_size = engine.board().grid_size(), "session started");
        Ok(GameSession {
            config,
            policy,
            rng,
            level,
            state: GameState::Playing,
            engine,
        })
    }

    /// Swaps the grid-size policy and regenerates the current level with it.
    pub fn with_policy(mut self, policy: impl GridSizePolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self.start_level();
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == GameState::LevelComplete
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn grid_size(&self) -> usize {
        self.engine.board().grid_size()
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn engine(&self) -> &ConnectionEngine {
        &self.engine
    }

    /// Builds the render snapshot for the current state.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            level: self.level,
            grid_size: self.grid_size(),
            markers: self.engine.markers(),
            connections: self.engine.connections(),
            score: self.engine.score(),
            progress: Progress::of(self.engine.markers()),
            complete: self.is_complete(),
            drag_start: self.engine.drag_start().map(|m| m.id),
        }
    }

    /// Feeds one pointer event to the engine and re-evaluates completion.
    ///
    /// Returns `true` if the event committed a connection.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let committed = self.engine.handle_event(event);
        if committed {
            self.refresh_completion();
        }
        committed
    }

    /// Clears all connections and the score, keeping the current board's colors.
    pub fn reset_game(&mut self) {
        self.engine.reset();
        self.refresh_completion();
        debug!(level = self.level, "game reset");
    }

    /// Advances one level and generates a fresh board for it.
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.start_level();
    }

    /// Goes back one level (never below 1) and generates a fresh board for it.
    pub fn level_down(&mut self) {
        self.level = self.level.saturating_sub(1).max(1);
        self.start_level();
    }

    /// Jumps to `level` (clamped to at least 1) and generates a fresh board for it.
    pub fn go_to_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.start_level();
    }

    /// Plays `board` at the current level instead of a generated one.
    pub fn install_board(&mut self, board: Board) {
        debug!(level = self.level, grid_size = board.grid_size(), "board installed");
        self.engine.replace_board(board);
        self.refresh_completion();
    }

    fn start_level(&mut self) {
        let grid_size = self.policy.grid_size(self.level);
        let board = generate_board(
            grid_size,
            &self.config.palette,
            self.config.layout,
            &mut self.rng,
        );
        debug!(level = self.level, grid_size, "level started");
        self.engine.replace_board(board);
        self.refresh_completion();
    }

    fn refresh_completion(&mut self) {
        let complete = is_complete(self.engine.markers(), self.config.completion);
        if complete && self.state == GameState::Playing {
            info!(level = self.level, score = self.engine.score(), "level complete");
        }
        self.state = if complete {
            GameState::LevelComplete
        } else {
            GameState::Playing
        };
    }
}
