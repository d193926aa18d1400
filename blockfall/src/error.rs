/// Error types for the blockfall library
use thiserror::Error;

/// Result type alias for blockfall operations
pub type Result<T> = std::result::Result<T, BlockfallError>;

/// Errors raised while building a game.
///
/// Gameplay itself never fails: illegal moves are rejected silently and the
/// only terminal condition is the `GameOver` session state. These errors only
/// come out of configuration and construction boundaries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockfallError {
    /// Board too small to hold every shape
    #[error("Invalid board dimensions: {width}x{height} (need at least 4 columns and 1 row)")]
    InvalidDimensions {
        /// Requested number of columns
        width: usize,
        /// Requested number of rows
        height: usize,
    },

    /// Speed level outside 1..=10
    #[error("Invalid speed level: {0} (expected 1..=10)")]
    InvalidSpeed(u8),

    /// Decoded board rows do not match its declared size
    #[error("Board rows do not match declared size {width}x{height}")]
    BoardShapeMismatch {
        /// Declared number of columns
        width: usize,
        /// Declared number of rows
        height: usize,
    },

    /// Decoded piece mask is empty or its rows differ in length
    #[error("Piece mask is not a non-empty rectangle")]
    MalformedMask,

    /// A scripted piece sequence needs at least one kind
    #[error("Piece sequence is empty")]
    EmptySequence,
}
