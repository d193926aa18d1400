use serde::{Deserialize, Serialize};

use crate::error::BlockfallError;
use crate::shapes::{Color, Shape, ShapeKind};

/// Owned, row-major occupancy mask of a piece
pub type Mask = Vec<Vec<bool>>;

/// The falling piece.
///
/// `x`/`y` are the board coordinates of the mask's top-left corner. `y` may be
/// negative while the piece is partially above the visible grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPiece")]
pub struct Piece {
    pub kind: ShapeKind,
    pub mask: Mask,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

#[derive(Deserialize)]
struct RawPiece {
    kind: ShapeKind,
    mask: Mask,
    color: Color,
    x: i32,
    y: i32,
}

impl TryFrom<RawPiece> for Piece {
    type Error = BlockfallError;

    fn try_from(raw: RawPiece) -> Result<Self, Self::Error> {
        let width = raw.mask.first().map_or(0, |row| row.len());
        if width == 0 || raw.mask.iter().any(|row| row.len() != width) {
            return Err(BlockfallError::MalformedMask);
        }
        Ok(Piece {
            kind: raw.kind,
            mask: raw.mask,
            color: raw.color,
            x: raw.x,
            y: raw.y,
        })
    }
}

impl Piece {
    /// Copy a catalog shape into a fresh piece so rotations never touch the catalog
    pub fn from_shape(shape: &Shape, x: i32, y: i32) -> Self {
        let mask = shape
            .mask
            .iter()
            .map(|row| row.iter().map(|&v| v != 0).collect())
            .collect();
        Piece {
            kind: shape.kind,
            mask,
            color: shape.color,
            x,
            y,
        }
    }

    pub fn width(&self) -> usize {
        self.mask.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.mask.len()
    }

    /// Board coordinates of every filled cell, shifted by (dx, dy)
    pub fn cells_offset(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (x, y) = (self.x + dx, self.y + dy);
        self.mask.iter().enumerate().flat_map(move |(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(col, _)| (x + col as i32, y + row as i32))
        })
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_offset(0, 0)
    }

    /// Mask rotated 90° clockwise.
    ///
    /// Row `i` of the result is column `i` of the original read bottom to top,
    /// so a `h x w` mask becomes `w x h`.
    pub fn rotated_mask(&self) -> Mask {
        (0..self.width())
            .map(|col| self.mask.iter().rev().map(|row| row[col]).collect())
            .collect()
    }
}
