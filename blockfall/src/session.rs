use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::gravity::{GravityClock, SpeedLevel};
use crate::piece::Piece;
use crate::scoring::{line_clear_points, HARD_DROP_POINTS_PER_CELL, SOFT_DROP_POINTS};
use crate::snapshot::GameSnapshot;
use crate::spawner::{PieceSource, PieceSpawner, RandomSource};

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Running => write!(f, "Running"),
            SessionState::Paused => write!(f, "Paused"),
            SessionState::GameOver => write!(f, "Game Over"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn dx(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Everything the presentation layer can ask the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    TogglePause,
    Reset,
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
    SpeedUp,
    SpeedDown,
    SetSpeed(u8),
}

/// What an operation did. Purely informational, nothing here is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Not allowed in the current state, nothing changed
    Ignored,
    /// The piece would collide, nothing changed
    Blocked,
    /// State changed and the piece (if any) is still falling
    Applied,
    /// The piece locked and `lines` rows were cleared
    Locked { lines: usize },
    /// The session just ended
    GameOver,
}

/// Owns the board, the falling piece, the score and the gravity timer.
///
/// The session never looks at a wall clock: the owner either calls
/// [`GameSession::tick`] directly or feeds elapsed time to
/// [`GameSession::advance`].
pub struct GameSession {
    config: GameConfig,
    board: Board,
    spawner: PieceSpawner,
    current: Option<Piece>,
    score: u32,
    lines_cleared: u32,
    state: SessionState,
    speed: SpeedLevel,
    gravity: GravityClock,
}

impl GameSession {
    /// Session drawing pieces from a `RandomSource` seeded by `config.seed`
    pub fn new(config: GameConfig) -> Result<Self> {
        let source = match config.seed {
            Some(seed) => RandomSource::seeded(seed, config.piece_rule),
            None => RandomSource::from_entropy(config.piece_rule),
        };
        Self::with_source(config, Box::new(source))
    }

    /// Session drawing pieces from a caller-provided source
    pub fn with_source(config: GameConfig, source: Box<dyn PieceSource + Send>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.width, config.height),
            spawner: PieceSpawner::new(source),
            current: None,
            score: 0,
            lines_cleared: 0,
            state: SessionState::Idle,
            speed: config.speed,
            gravity: GravityClock::new(config.speed.interval()),
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct access to the locked cells, for preset puzzles and tests
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_piece(&self) -> Option<&Piece> {
        self.spawner.peek()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    /// Time accumulated toward the next gravity tick
    pub fn gravity_pending(&self) -> Duration {
        self.gravity.pending()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            current: self.current.clone(),
            next: self.spawner.peek().cloned(),
            score: self.score,
            lines_cleared: self.lines_cleared,
            state: self.state,
            speed: self.speed,
        }
    }

    /// Dispatch a presentation command
    pub fn apply(&mut self, command: Command) -> StepResult {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            Command::MoveLeft => self.move_piece(Direction::Left),
            Command::MoveRight => self.move_piece(Direction::Right),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::SpeedUp => self.set_speed(self.speed.faster()),
            Command::SpeedDown => self.set_speed(self.speed.slower()),
            Command::SetSpeed(level) => self.set_speed(SpeedLevel::new(level)),
        }
    }

    /// Begin a fresh game from any state
    pub fn start(&mut self) -> StepResult {
        self.board.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.current = None;
        self.spawner.clear();
        // the interval already tracks self.speed
        self.gravity.reset();
        self.state = SessionState::Running;
        tracing::info!(
            "Game started on {}x{} board at speed {}",
            self.board.width(),
            self.board.height(),
            self.speed
        );
        self.spawn_next()
    }

    /// Stop play and return to `Idle` with an empty board and default speed
    pub fn reset(&mut self) -> StepResult {
        self.board.clear();
        self.score = 0;
        self.lines_cleared = 0;
        self.current = None;
        self.spawner.clear();
        self.speed = SpeedLevel::DEFAULT;
        self.gravity.set_interval(self.speed.interval());
        self.state = SessionState::Idle;
        tracing::info!("Game reset");
        StepResult::Applied
    }

    pub fn pause(&mut self) -> StepResult {
        if self.state != SessionState::Running {
            return StepResult::Ignored;
        }
        self.state = SessionState::Paused;
        tracing::info!("Game paused");
        StepResult::Applied
    }

    pub fn resume(&mut self) -> StepResult {
        if self.state != SessionState::Paused {
            return StepResult::Ignored;
        }
        self.state = SessionState::Running;
        tracing::info!("Game resumed");
        StepResult::Applied
    }

    pub fn toggle_pause(&mut self) -> StepResult {
        match self.state {
            SessionState::Running => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::Idle | SessionState::GameOver => StepResult::Ignored,
        }
    }

    /// Change the fall speed. The gravity timer restarts from zero at the new
    /// interval, whatever the session state.
    pub fn set_speed(&mut self, level: SpeedLevel) -> StepResult {
        self.speed = level;
        self.gravity.set_interval(level.interval());
        tracing::debug!("Speed set to {} ({:?} per row)", level, self.gravity.interval());
        StepResult::Applied
    }

    /// Timer-driven path: runs one `tick` per gravity interval contained in
    /// `elapsed`. Returns how many ticks ran. Time spent outside `Running`
    /// does not count.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.state != SessionState::Running {
            return 0;
        }
        let due = self.gravity.advance(elapsed);
        let mut ran = 0;
        for _ in 0..due {
            if self.state != SessionState::Running {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    /// One gravity step: fall a row, or lock when resting on something
    pub fn tick(&mut self) -> StepResult {
        if self.state != SessionState::Running {
            return StepResult::Ignored;
        }
        self.step_down()
    }

    pub fn move_piece(&mut self, direction: Direction) -> StepResult {
        if self.state != SessionState::Running {
            return StepResult::Ignored;
        }
        let Some(piece) = self.current.as_mut() else {
            return StepResult::Ignored;
        };
        let dx = direction.dx();
        if self.board.collides(piece, dx, 0) {
            tracing::trace!("Move {:?} blocked at x={}", direction, piece.x);
            return StepResult::Blocked;
        }
        piece.x += dx;
        StepResult::Applied
    }

    /// Rotate clockwise, trying the current column, then one left, then one
    /// right. If all three collide the piece is left untouched.
    pub fn rotate(&mut self) -> StepResult {
        if self.state != SessionState::Running {
            return StepResult::Ignored;
        }
        let Some(piece) = self.current.as_mut() else {
            return StepResult::Ignored;
        };
        let rotated = Piece {
            mask: piece.rotated_mask(),
            ..piece.clone()
        };
        for kick in [0, -1, 1] {
            if !self.board.collides(&rotated, kick, 0) {
                piece.mask = rotated.mask;
                piece.x += kick;
                return StepResult::Applied;
            }
        }
        tracing::trace!("Rotation of {:?} blocked at x={}", piece.kind, piece.x);
        StepResult::Blocked
    }

    /// Manual one-row descent, worth a point even when it locks the piece
    pub fn soft_drop(&mut self) -> StepResult {
        if self.state != SessionState::Running {
            return StepResult::Ignored;
        }
        let result = self.step_down();
        self.score = self.score.saturating_add(SOFT_DROP_POINTS);
        result
    }

    /// Drop straight to the resting row, two points per row, then lock
    pub fn hard_drop(&mut self) -> StepResult {
        if self.state != SessionState::Running {
            return StepResult::Ignored;
        }
        let Some(piece) = self.current.as_mut() else {
            return StepResult::Ignored;
        };
        let mut rows = 0;
        while !self.board.collides(piece, 0, 1) {
            piece.y += 1;
            rows += 1;
        }
        self.score = self.score.saturating_add(rows * HARD_DROP_POINTS_PER_CELL);
        self.lock_current()
    }

    /// Promote the lookahead piece to current and draw a new lookahead.
    /// Ends the game when the new piece has no room.
    pub fn spawn_next(&mut self) -> StepResult {
        if self.state != SessionState::Running {
            return StepResult::Ignored;
        }
        let piece = self.spawner.spawn(self.board.width());
        if self.board.collides(&piece, 0, 0) {
            tracing::debug!("No room to spawn {:?} at x={}", piece.kind, piece.x);
            self.current = None;
            self.state = SessionState::GameOver;
            tracing::info!(
                "Game over with score {} ({} lines)",
                self.score,
                self.lines_cleared
            );
            return StepResult::GameOver;
        }
        self.current = Some(piece);
        StepResult::Applied
    }

    fn step_down(&mut self) -> StepResult {
        let Some(piece) = self.current.as_mut() else {
            return StepResult::Ignored;
        };
        if !self.board.collides(piece, 0, 1) {
            piece.y += 1;
            return StepResult::Applied;
        }
        self.lock_current()
    }

    fn lock_current(&mut self) -> StepResult {
        let Some(piece) = self.current.take() else {
            return StepResult::Ignored;
        };
        self.board.lock(&piece);
        let lines = self.board.clear_full_lines();
        if lines > 0 {
            self.lines_cleared = self.lines_cleared.saturating_add(lines as u32);
            self.score = self.score.saturating_add(line_clear_points(lines));
            tracing::debug!(
                "Cleared {} line(s), score {} ({} lines total)",
                lines,
                self.score,
                self.lines_cleared
            );
        }
        tracing::debug!("Locked {:?} at ({}, {})", piece.kind, piece.x, piece.y);
        match self.spawn_next() {
            StepResult::GameOver => StepResult::GameOver,
            _ => StepResult::Locked { lines },
        }
    }
}
