//! Piece generation with one piece of lookahead

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{BlockfallError, Result};
use crate::piece::Piece;
use crate::shapes::{shape, ShapeKind};

/// Source of piece kinds. Swap it out to get reproducible sequences.
pub trait PieceSource {
    fn next_kind(&mut self) -> ShapeKind;
}

/// How a `RandomSource` picks kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PieceRule {
    /// Every draw is an independent uniform pick among the seven kinds
    #[default]
    Uniform,
    /// Deal all seven kinds in a shuffled bag before refilling
    Bag7,
}

pub struct RandomSource<R = StdRng> {
    rule: PieceRule,
    rng: R,
    bag: [ShapeKind; 7],
    bag_idx: usize,
}

impl RandomSource<StdRng> {
    /// Seeded source; the same seed always yields the same sequence
    pub fn seeded(seed: u64, rule: PieceRule) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), rule)
    }

    /// Source seeded from the operating system
    pub fn from_entropy(rule: PieceRule) -> Self {
        Self::from_rng(StdRng::from_os_rng(), rule)
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn from_rng(rng: R, rule: PieceRule) -> Self {
        Self {
            rule,
            rng,
            bag: ShapeKind::ALL,
            // force a refill on the first bag draw
            bag_idx: ShapeKind::ALL.len(),
        }
    }
}

impl<R: Rng> PieceSource for RandomSource<R> {
    fn next_kind(&mut self) -> ShapeKind {
        match self.rule {
            PieceRule::Uniform => ShapeKind::ALL[self.rng.random_range(0..ShapeKind::ALL.len())],
            PieceRule::Bag7 => {
                if self.bag_idx >= self.bag.len() {
                    self.bag = ShapeKind::ALL;
                    self.bag.shuffle(&mut self.rng);
                    self.bag_idx = 0;
                }
                let kind = self.bag[self.bag_idx];
                self.bag_idx += 1;
                kind
            }
        }
    }
}

/// Replays a fixed list of kinds, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<ShapeKind>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(kinds: Vec<ShapeKind>) -> Result<Self> {
        if kinds.is_empty() {
            return Err(BlockfallError::EmptySequence);
        }
        Ok(Self { kinds, pos: 0 })
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> ShapeKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}

/// Produces spawn-ready pieces and keeps the next one ready for preview
pub struct PieceSpawner {
    source: Box<dyn PieceSource + Send>,
    next: Option<Piece>,
}

impl PieceSpawner {
    pub fn new(source: Box<dyn PieceSource + Send>) -> Self {
        Self { source, next: None }
    }

    /// Draw a new piece, horizontally centered on the top row
    pub fn random_piece(&mut self, board_width: usize) -> Piece {
        let shape = shape(self.source.next_kind());
        let x = (board_width / 2) as i32 - (shape.width() / 2) as i32;
        Piece::from_shape(shape, x, 0)
    }

    /// Promote the pending next piece (drawing one if there is none) and draw
    /// a replacement lookahead
    pub fn spawn(&mut self, board_width: usize) -> Piece {
        let current = match self.next.take() {
            Some(piece) => piece,
            None => self.random_piece(board_width),
        };
        self.next = Some(self.random_piece(board_width));
        current
    }

    pub fn peek(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Forget the lookahead piece
    pub fn clear(&mut self) {
        self.next = None;
    }
}
