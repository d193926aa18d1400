//! # blockfall
//!
//! Simulation core for a single-player falling-block puzzle game.
//!
//! ## Overview
//!
//! The `blockfall` library owns the rules of the game and nothing else: a
//! fixed-size well of locked cells, one falling tetromino plus a one-piece
//! lookahead, collision and rotation, line clearing, scoring and a polled
//! gravity timer. Rendering and input belong to the caller, which talks to
//! the core through [`GameSession`] and reads it back through
//! [`GameSnapshot`].
//!
//! ## Key Features
//!
//! - Deterministic play from a seed or a scripted piece sequence
//! - Clockwise rotation with a one-column wall kick
//! - Classic line clear table (100 / 300 / 500 / 800) plus drop bonuses
//! - Ten speed levels; gravity driven by elapsed time, no wall clock inside
//! - Serializable snapshots for renderers and state dumps
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use blockfall::{Command, GameConfig, GameSession, SessionState};
//!
//! let mut session = GameSession::new(GameConfig::new().with_seed(7)).unwrap();
//! session.apply(Command::Start);
//! session.apply(Command::MoveLeft);
//! session.advance(Duration::from_millis(600));
//! assert_eq!(session.state(), SessionState::Running);
//! ```

// Module declarations
pub mod board;
pub mod config;
pub mod error;
pub mod gravity;
pub mod piece;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod spawner;

// Re-exports for convenience
pub use board::{Board, Cell};
pub use config::GameConfig;
pub use error::{BlockfallError, Result};
pub use gravity::{GravityClock, SpeedLevel};
pub use piece::Piece;
pub use session::{Command, Direction, GameSession, SessionState, StepResult};
pub use shapes::{Color, Shape, ShapeKind};
pub use snapshot::GameSnapshot;
pub use spawner::{PieceRule, PieceSource, PieceSpawner, RandomSource, SequenceSource};
