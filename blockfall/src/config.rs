//! Configuration for a game session

use crate::error::{BlockfallError, Result};
use crate::gravity::SpeedLevel;
use crate::spawner::PieceRule;

/// Smallest board width that still fits the horizontal I piece
pub const MIN_WIDTH: usize = 4;

/// Main configuration for a GameSession
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Board columns
    pub width: usize,

    /// Board rows
    pub height: usize,

    /// Fall speed when the session is created
    pub speed: SpeedLevel,

    /// Seed for piece selection (OS entropy if None)
    pub seed: Option<u64>,

    /// How random pieces are drawn
    pub piece_rule: PieceRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            speed: SpeedLevel::DEFAULT,
            seed: None,
            piece_rule: PieceRule::Uniform,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board dimensions
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the initial speed level (clamped to 1..=10)
    pub fn with_speed(mut self, level: u8) -> Self {
        self.speed = SpeedLevel::new(level);
        self
    }

    /// Set the piece selection seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the piece selection rule
    pub fn with_piece_rule(mut self, rule: PieceRule) -> Self {
        self.piece_rule = rule;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_WIDTH || self.height == 0 {
            return Err(BlockfallError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 20);
        assert_eq!(config.speed.get(), 5);
        assert_eq!(config.seed, None);
        assert_eq!(config.piece_rule, PieceRule::Uniform);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_size(12, 24)
            .with_speed(99)
            .with_seed(7)
            .with_piece_rule(PieceRule::Bag7);
        assert_eq!((config.width, config.height), (12, 24));
        assert_eq!(config.speed.get(), 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.piece_rule, PieceRule::Bag7);
    }

    #[test]
    fn test_validate_rejects_tiny_boards() {
        assert_eq!(
            GameConfig::new().with_size(3, 20).validate(),
            Err(BlockfallError::InvalidDimensions { width: 3, height: 20 })
        );
        assert!(GameConfig::new().with_size(10, 0).validate().is_err());
        assert!(GameConfig::new().with_size(4, 1).validate().is_ok());
    }
}
